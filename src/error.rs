//! Crate-wide error taxonomy, one enum per module boundary, following the
//! `thiserror`-derived, non-panicking style the bus simulator used for its
//! `AgentError`/`ProtocolError` types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("primary header needs 6 bytes, got {0}")]
    HeaderTooShort(usize),
    #[error("packet_data_length {declared} implies {needed} bytes, only {have} available")]
    LengthOverflow { declared: u16, needed: usize, have: usize },
    #[error("packet truncated: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
    #[error("CRC mismatch: expected {expected:#06x}, computed {actual:#06x}")]
    CrcMismatch { expected: u16, actual: u16 },
    #[error("secondary header too short for {0}-byte layout")]
    SecondaryHeaderTooShort(usize),
    #[error("field underflow decoding service {service}/{subtype}: need {need} bytes, have {have}")]
    FieldUnderflow { service: u8, subtype: u8, need: usize, have: usize },
    #[error("encoder payload of {0} bytes exceeds the maximum packet data field")]
    PayloadTooLarge(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("integrator step rejected below minimum step size: {reason}")]
    IntegratorUnderflow { reason: &'static str },
    #[error("actuator {name} saturated on axis {axis}")]
    ActuatorSaturated { name: &'static str, axis: u8 },
    #[error("sensor {name} faulted: {kind}")]
    SensorFault { name: &'static str, kind: &'static str },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("schedule id {0} not found")]
    UnknownScheduleId(u32),
    #[error("scheduler queue at capacity ({0})")]
    QueueFull(usize),
    #[error("execution time {execution_time} too far in the future (now={now})")]
    ExecutionTimeUnreasonable { execution_time: u64, now: u64 },
}
