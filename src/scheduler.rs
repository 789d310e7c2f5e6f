use super::*;

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    ResizeSettle,
    DismissBanner { banner: NodeId },
}

impl TimerTask {
    pub(crate) fn kind(&self) -> TimerKind {
        match self {
            Self::ResizeSettle => TimerKind::ResizeSettle,
            Self::DismissBanner { .. } => TimerKind::BannerDismiss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    ResizeSettle,
    BannerDismiss,
}

/// A timer that has not fired yet, as reported by [`Page::pending_timers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) task: TimerTask,
}

impl ScheduledTask {
    // Ids grow with scheduling order, so ties on `due_at` fire first-in first-out.
    fn run_order(&self) -> (i64, i64) {
        (self.due_at, self.id)
    }
}

/// Virtual clock plus the `setTimeout` queue.
#[derive(Debug)]
pub(crate) struct SchedulerState {
    queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    next_id: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::with_step_limit(10_000)
    }
}

impl SchedulerState {
    pub(crate) fn with_step_limit(timer_step_limit: usize) -> Self {
        Self {
            queue: Vec::new(),
            now_ms: 0,
            timer_step_limit,
            next_id: 1,
        }
    }

    /// `setTimeout`: returns the timer id. Negative delays count as zero.
    pub(crate) fn schedule(&mut self, task: TimerTask, delay_ms: i64) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            task,
        });
        id
    }

    /// `clearTimeout`: true when a pending timer was removed.
    pub(crate) fn clear(&mut self, timer_id: i64) -> bool {
        let before = self.queue.len();
        self.queue.retain(|task| task.id != timer_id);
        self.queue.len() != before
    }

    fn peek_next(&self, due_limit: Option<i64>) -> Option<(usize, &ScheduledTask)> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| task.run_order())
    }

    pub(crate) fn has_due(&self, due_limit: Option<i64>) -> bool {
        self.peek_next(due_limit).is_some()
    }

    /// Removes and returns the earliest task due at or before `due_limit`.
    pub(crate) fn pop_next(&mut self, due_limit: Option<i64>) -> Option<ScheduledTask> {
        let (index, _) = self.peek_next(due_limit)?;
        Some(self.queue.remove(index))
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut tasks: Vec<&ScheduledTask> = self.queue.iter().collect();
        tasks.sort_by_key(|task| task.run_order());
        tasks
            .into_iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                kind: task.task.kind(),
            })
            .collect()
    }

    pub(crate) fn step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let next = self.peek_next(due_limit).map_or_else(
            || "none".to_string(),
            |(_, task)| format!("id={},due_at={},kind={:?}", task.id, task.due_at, task.task.kind()),
        );
        let due_limit = due_limit.map_or_else(|| "none".to_string(), |limit| limit.to_string());
        Error::Runtime(format!(
            "flush exceeded max task steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit}, pending_tasks={}, next_task={next}",
            self.timer_step_limit,
            self.now_ms,
            self.queue.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_due_times_fire_in_scheduling_order() {
        let mut scheduler = SchedulerState::default();
        let first = scheduler.schedule(TimerTask::ResizeSettle, 100);
        let second = scheduler.schedule(TimerTask::DismissBanner { banner: NodeId(3) }, 100);
        let early = scheduler.schedule(TimerTask::ResizeSettle, -5);

        let order: Vec<i64> = std::iter::from_fn(|| scheduler.pop_next(None))
            .map(|task| task.id)
            .collect();
        assert_eq!(order, [early, first, second]);
    }

    #[test]
    fn due_limit_holds_back_later_tasks() {
        let mut scheduler = SchedulerState::default();
        scheduler.schedule(TimerTask::ResizeSettle, 250);
        assert!(scheduler.pop_next(Some(249)).is_none());
        assert_eq!(scheduler.pending().len(), 1);
        assert!(scheduler.pop_next(Some(250)).is_some());
        assert!(!scheduler.clear(1));
    }

    #[test]
    fn step_limit_is_reported_in_the_overflow_error() {
        let mut scheduler = SchedulerState::with_step_limit(3);
        scheduler.schedule(TimerTask::ResizeSettle, 10);
        assert_eq!(scheduler.timer_step_limit, 3);
        assert_eq!(scheduler.now_ms, 0);
        let Error::Runtime(message) = scheduler.step_limit_error(4, None) else {
            panic!("expected a runtime error");
        };
        assert!(message.contains("limit=3"), "{message}");
        assert!(message.contains("next_task=id=1,due_at=10"), "{message}");
    }
}
