//! Time-tagged command scheduling (C17): holds encoded command packets
//! until their execution condition is met, then hands them back for
//! transmission/application. Four schedule kinds cover the ways a ground
//! segment defers a command: a fixed wall-clock time, an offset from now,
//! a repeating interval, or a named external condition.

use heapless::Vec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SchedulerError;

const MAX_SCHEDULED_COMMANDS: usize = 32;
const MAX_READY_PER_POLL: usize = 8;
pub const MAX_PAYLOAD_LEN: usize = 256;

pub type Payload = Vec<u8, MAX_PAYLOAD_LEN>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleKind {
    Absolute,
    Relative,
    Periodic { interval_s: u64 },
    Conditional { condition_id: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub id: u32,
    pub payload: Payload,
    pub kind: ScheduleKind,
    pub execution_time: u64,
    pub scheduled_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchedulerStats {
    pub total_scheduled: u32,
    pub total_executed: u32,
    pub total_expired: u32,
    pub total_cancelled: u32,
    pub currently_scheduled: u8,
}

#[derive(Debug)]
pub struct CommandScheduler {
    scheduled_commands: Vec<ScheduledCommand, MAX_SCHEDULED_COMMANDS>,
    stats: SchedulerStats,
    command_timeout_s: u64,
    next_id: u32,
}

impl CommandScheduler {
    pub fn new() -> Self {
        Self {
            scheduled_commands: Vec::new(),
            stats: SchedulerStats::default(),
            command_timeout_s: 3600,
            next_id: 1,
        }
    }

    fn insert(&mut self, payload: Payload, kind: ScheduleKind, execution_time: u64, current_time: u64) -> Result<u32, SchedulerError> {
        if execution_time > current_time + self.command_timeout_s {
            return Err(SchedulerError::ExecutionTimeUnreasonable { execution_time, now: current_time });
        }
        if self.scheduled_commands.is_full() {
            return Err(SchedulerError::QueueFull(MAX_SCHEDULED_COMMANDS));
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let scheduled = ScheduledCommand { id, payload, kind, execution_time, scheduled_at: current_time };
        let _ = self.scheduled_commands.push(scheduled);
        self.scheduled_commands.sort_by_key(|cmd| cmd.execution_time);

        self.stats.total_scheduled += 1;
        self.stats.currently_scheduled = self.scheduled_commands.len() as u8;
        Ok(id)
    }

    pub fn schedule_absolute(&mut self, payload: Payload, execution_time: u64, current_time: u64) -> Result<u32, SchedulerError> {
        self.insert(payload, ScheduleKind::Absolute, execution_time, current_time)
    }

    pub fn schedule_relative(&mut self, payload: Payload, offset_s: u64, current_time: u64) -> Result<u32, SchedulerError> {
        self.insert(payload, ScheduleKind::Relative, current_time + offset_s, current_time)
    }

    pub fn schedule_periodic(&mut self, payload: Payload, interval_s: u64, current_time: u64) -> Result<u32, SchedulerError> {
        self.insert(payload, ScheduleKind::Periodic { interval_s }, current_time + interval_s, current_time)
    }

    pub fn schedule_conditional(&mut self, payload: Payload, condition_id: u32, current_time: u64) -> Result<u32, SchedulerError> {
        self.insert(payload, ScheduleKind::Conditional { condition_id }, current_time, current_time)
    }

    /// Returns commands ready to fire at `current_time`. `conditions` supplies
    /// the current truth value of each named condition a `Conditional` entry
    /// may depend on; an entry whose id is absent is treated as not-yet-true
    /// and stays queued.
    pub fn get_ready_commands(&mut self, current_time: u64, conditions: &[(u32, bool)]) -> Vec<Payload, MAX_READY_PER_POLL> {
        let mut ready: Vec<Payload, MAX_READY_PER_POLL> = Vec::new();
        let mut fire_indices: Vec<usize, MAX_READY_PER_POLL> = Vec::new();

        for (index, cmd) in self.scheduled_commands.iter().enumerate() {
            let due = match cmd.kind {
                ScheduleKind::Conditional { condition_id } => {
                    conditions.iter().any(|&(id, value)| id == condition_id && value)
                }
                _ => cmd.execution_time <= current_time,
            };
            if !due {
                continue;
            }
            if ready.push(cmd.payload.clone()).is_err() {
                break;
            }
            let _ = fire_indices.push(index);
        }

        let mut reschedule: Vec<(Payload, u64, u64), MAX_READY_PER_POLL> = Vec::new();
        for &index in fire_indices.iter().rev() {
            let cmd = self.scheduled_commands.remove(index);
            self.stats.total_executed += 1;
            info!(id = cmd.id, execution_time = cmd.execution_time, "scheduled command executed");
            if let ScheduleKind::Periodic { interval_s } = cmd.kind {
                let _ = reschedule.push((cmd.payload, cmd.execution_time + interval_s, interval_s));
            }
        }
        for (payload, next_time, interval_s) in reschedule {
            let _ = self.insert(payload, ScheduleKind::Periodic { interval_s }, next_time, current_time);
        }

        self.stats.currently_scheduled = self.scheduled_commands.len() as u8;
        ready
    }

    pub fn cleanup_expired_commands(&mut self, current_time: u64) {
        let timeout_threshold = current_time.saturating_sub(self.command_timeout_s);
        let initial_count = self.scheduled_commands.len();
        self.scheduled_commands.retain(|cmd| cmd.scheduled_at > timeout_threshold);
        let expired = initial_count - self.scheduled_commands.len();
        self.stats.total_expired += expired as u32;
        self.stats.currently_scheduled = self.scheduled_commands.len() as u8;
    }

    pub fn get_stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn get_scheduled_commands(&self) -> &[ScheduledCommand] {
        &self.scheduled_commands
    }

    pub fn clear_all_scheduled(&mut self) {
        let cleared = self.scheduled_commands.len();
        self.scheduled_commands.clear();
        self.stats.total_expired += cleared as u32;
        self.stats.currently_scheduled = 0;
    }

    /// Cancels the scheduled command with the given id, moving it
    /// `PENDING -> CANCELLED`. Returns `true` if an entry was found and
    /// removed; a cancelled periodic command does not reschedule itself.
    pub fn cancel(&mut self, schedule_id: u32) -> bool {
        match self.scheduled_commands.iter().position(|cmd| cmd.id == schedule_id) {
            Some(index) => {
                self.scheduled_commands.remove(index);
                self.stats.total_cancelled += 1;
                self.stats.currently_scheduled = self.scheduled_commands.len() as u8;
                info!(schedule_id, "scheduled command cancelled");
                true
            }
            None => {
                warn!(schedule_id, "cancel requested for unknown schedule id");
                false
            }
        }
    }

    /// Cancels every scheduled command.
    pub fn cancel_all(&mut self) {
        let cleared = self.scheduled_commands.len();
        self.scheduled_commands.clear();
        self.stats.total_cancelled += cleared as u32;
        self.stats.currently_scheduled = 0;
        info!(cleared, "all scheduled commands cancelled");
    }

    pub fn set_timeout_seconds(&mut self, timeout_s: u64) {
        self.command_timeout_s = timeout_s;
    }
}

impl Default for CommandScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(byte: u8) -> Payload {
        let mut p = Payload::new();
        let _ = p.push(byte);
        p
    }

    #[test]
    fn relative_schedule_fires_after_offset() {
        let mut scheduler = CommandScheduler::new();
        scheduler.schedule_relative(payload(1), 10, 1000).unwrap();

        assert_eq!(scheduler.get_ready_commands(1005, &[]).len(), 0);
        let ready = scheduler.get_ready_commands(1010, &[]);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0][0], 1);
    }

    #[test]
    fn commands_fire_in_chronological_order() {
        let mut scheduler = CommandScheduler::new();
        scheduler.schedule_absolute(payload(3), 3000, 1000).unwrap();
        scheduler.schedule_absolute(payload(1), 1000, 1000).unwrap();
        scheduler.schedule_absolute(payload(2), 2000, 1000).unwrap();

        assert_eq!(scheduler.get_ready_commands(1000, &[])[0][0], 1);
        assert_eq!(scheduler.get_ready_commands(2000, &[])[0][0], 2);
        assert_eq!(scheduler.get_ready_commands(3000, &[])[0][0], 3);
    }

    #[test]
    fn execution_time_too_far_ahead_is_rejected() {
        let mut scheduler = CommandScheduler::new();
        scheduler.set_timeout_seconds(5);
        let result = scheduler.schedule_absolute(payload(1), 10_000, 1000);
        assert!(result.is_err());
    }

    #[test]
    fn periodic_command_reschedules_itself() {
        let mut scheduler = CommandScheduler::new();
        scheduler.schedule_periodic(payload(9), 100, 0).unwrap();

        let first = scheduler.get_ready_commands(100, &[]);
        assert_eq!(first.len(), 1);
        assert_eq!(scheduler.get_scheduled_commands().len(), 1);

        let second = scheduler.get_ready_commands(200, &[]);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn conditional_command_waits_for_its_condition() {
        let mut scheduler = CommandScheduler::new();
        scheduler.schedule_conditional(payload(7), 42, 0).unwrap();

        assert_eq!(scheduler.get_ready_commands(0, &[(42, false)]).len(), 0);
        assert_eq!(scheduler.get_ready_commands(0, &[(42, true)]).len(), 1);
    }

    #[test]
    fn cancelling_a_scheduled_command_removes_exactly_that_entry() {
        let mut scheduler = CommandScheduler::new();
        let keep = scheduler.schedule_absolute(payload(1), 1000, 0).unwrap();
        let drop = scheduler.schedule_absolute(payload(2), 1000, 0).unwrap();

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop), "cancelling twice finds nothing the second time");
        assert_eq!(scheduler.get_scheduled_commands().len(), 1);
        assert_eq!(scheduler.get_stats().total_cancelled, 1);

        let ready = scheduler.get_ready_commands(1000, &[]);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0][0], 1);
        let _ = keep;
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut scheduler = CommandScheduler::new();
        scheduler.schedule_absolute(payload(1), 1000, 0).unwrap();
        scheduler.schedule_absolute(payload(2), 2000, 0).unwrap();

        scheduler.cancel_all();

        assert_eq!(scheduler.get_scheduled_commands().len(), 0);
        assert_eq!(scheduler.get_stats().total_cancelled, 2);
    }

    #[test]
    fn cleanup_removes_commands_past_timeout() {
        let mut scheduler = CommandScheduler::new();
        scheduler.set_timeout_seconds(5);
        scheduler.schedule_relative(payload(1), 1, 1000).unwrap();
        scheduler.cleanup_expired_commands(1000 + 10);
        assert_eq!(scheduler.get_scheduled_commands().len(), 0);
        assert_eq!(scheduler.get_stats().total_expired, 1);
    }
}
