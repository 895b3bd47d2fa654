use tracing::{debug, info, trace};

use super::{
    event::SchedCoreEvent,
    observer::Observer,
    queue::{Event, EventKind, EventQueue},
    state::{Job, JobId, JobState, SimCtx, Ticks},
    stats::{CompletedJob, StatsCollector},
};
use crate::{
    error::InvariantViolation,
    scheduler::{ENQ_ARRIVAL, ENQ_PREEMPT, ENQ_WAKEUP, EnqueueFlags, Scheduler},
};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    events: EventQueue,
    stats: StatsCollector,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(),
            scheduler,
            events: EventQueue::new(),
            stats: StatsCollector::new(),
            observer: Observer::new(),
        }
    }

    /// Registers a NEW job and schedules its arrival.
    pub fn admit(&mut self, job: Job) -> Result<(), InvariantViolation> {
        debug_assert_eq!(job.state, JobState::New, "Admitted job must be New");
        let arrival = Event::new(job.id, EventKind::Arrival, job.arrival_time, self.ctx.now);
        self.ctx.insert_job(job)?;
        self.events.push(arrival);
        Ok(())
    }

    /// Runs until both queues are empty.
    pub fn run(&mut self) -> Result<(), InvariantViolation> {
        info!(
            scheduler = %self.scheduler.name(),
            jobs = self.ctx.jobs.len(),
            "starting simulation"
        );

        loop {
            // Everything due now goes first, so jobs made ready this tick
            // queue up before the CPU is handed out
            while self.events.peek_min_time().is_some_and(|t| t <= self.ctx.now) {
                if let Some(event) = self.events.pop_min() {
                    self.handle(event)?;
                }
            }

            if self.ctx.cpu_is_idle() {
                if let Some(job) = self.scheduler.dispatch(&mut self.ctx) {
                    self.dispatch(job)?;
                    continue;
                }
            }

            let Some(event) = self.events.pop_min() else {
                break;
            };
            self.ctx.advance_time(event.time());
            self.handle(event)?;
        }

        if !self.ctx.ready.is_empty() || !self.ctx.cpu_is_idle() {
            let stuck = self.ctx.ready.len() + usize::from(!self.ctx.cpu_is_idle());
            return Err(InvariantViolation::Stalled(stuck));
        }

        info!(
            steps = self.observer.steps(),
            completed = self.stats.completed().len(),
            end = self.ctx.now,
            "simulation finished"
        );
        Ok(())
    }

    // Hands the CPU to `id` and schedules whatever ends its slice
    fn dispatch(&mut self, id: JobId) -> Result<(), InvariantViolation> {
        let now = self.ctx.now;
        let from = self.ctx.set_running(id)?;
        self.record_transition(id, from, JobState::Running);
        self.stats.note_dispatch(now);

        let slice = self.scheduler.slice();
        let job = self.ctx.job_mut(id)?;
        job.start_time.get_or_insert(now);
        job.wait_time += now - job.last_ready_time;

        let (kind, runs_for) = match (job.cpu_bursts.front().copied(), slice) {
            (Some(burst), Some(quantum)) if burst > quantum => (EventKind::Preemption, quantum),
            (Some(burst), _) if job.io_bursts.is_empty() => (EventKind::Termination, burst),
            (Some(burst), _) => (EventKind::IoRequest, burst),
            // Last burst was I/O; nothing left to run
            (None, _) if job.io_bursts.is_empty() => (EventKind::Termination, 0),
            (None, _) => return Err(InvariantViolation::MissingCpuBurst(id)),
        };
        let at = later(now, runs_for, id)?;

        trace!(job = id, next = kind.name(), until = at, wait = job.wait_time, "dispatch");
        self.observer.record(SchedCoreEvent::Dispatched {
            time: now,
            job: id,
            next: kind,
            until: at,
        });
        self.events.push(Event::new(id, kind, at, now));
        self.observer.observe(&self.ctx);
        Ok(())
    }

    fn handle(&mut self, event: Event) -> Result<(), InvariantViolation> {
        debug!(
            now = self.ctx.now,
            kind = event.kind().name(),
            job = event.job(),
            scheduled_at = event.scheduled_at(),
            "event"
        );
        self.observer.record(SchedCoreEvent::Fired {
            time: self.ctx.now,
            job: event.job(),
            kind: event.kind(),
        });

        match event.kind() {
            EventKind::Arrival => self.handle_arrival(event),
            EventKind::Preemption => self.handle_preemption(event),
            EventKind::IoRequest => self.handle_io_request(event),
            EventKind::IoCompletion => self.handle_io_completion(event),
            EventKind::Termination => self.handle_termination(event),
        }?;

        self.observer.observe(&self.ctx);
        Ok(())
    }

    fn handle_arrival(&mut self, event: Event) -> Result<(), InvariantViolation> {
        debug_assert_eq!(event.time(), self.ctx.now);
        self.make_ready(event.job(), ENQ_ARRIVAL)
    }

    fn handle_preemption(&mut self, event: Event) -> Result<(), InvariantViolation> {
        let id = event.job();
        let ran_for = self.release_cpu(&event)?;

        let job = self.ctx.job_mut(id)?;
        let burst = job
            .cpu_bursts
            .pop_front()
            .ok_or(InvariantViolation::MissingCpuBurst(id))?;
        // Slices only preempt bursts longer than themselves
        debug_assert!(burst > ran_for, "Job {id} preempted after finishing its burst");
        job.cpu_bursts.push_front(burst.saturating_sub(ran_for));

        self.make_ready(id, ENQ_PREEMPT)
    }

    fn handle_io_request(&mut self, event: Event) -> Result<(), InvariantViolation> {
        let id = event.job();
        self.release_cpu(&event)?;

        let job = self.ctx.job_mut(id)?;
        job.cpu_bursts
            .pop_front()
            .ok_or(InvariantViolation::MissingCpuBurst(id))?;
        let io = job
            .io_bursts
            .pop_front()
            .ok_or(InvariantViolation::MissingIoBurst(id))?;

        let from = self.ctx.set_state(id, JobState::Blocked)?;
        self.record_transition(id, from, JobState::Blocked);

        let now = self.ctx.now;
        let done_at = later(now, io, id)?;
        self.events
            .push(Event::new(id, EventKind::IoCompletion, done_at, now));
        Ok(())
    }

    fn handle_io_completion(&mut self, event: Event) -> Result<(), InvariantViolation> {
        self.make_ready(event.job(), ENQ_WAKEUP)
    }

    fn handle_termination(&mut self, event: Event) -> Result<(), InvariantViolation> {
        let id = event.job();
        self.release_cpu(&event)?;

        let now = self.ctx.now;
        let job = self.ctx.job_mut(id)?;
        job.cpu_bursts.pop_front();
        if !job.out_of_work() {
            return Err(InvariantViolation::WorkLeft(id));
        }
        job.completion_time = Some(now);
        job.turnaround_time = Some(now - job.arrival_time);

        let from = self.ctx.set_state(id, JobState::Exit)?;
        self.record_transition(id, from, JobState::Exit);

        let done = CompletedJob::from_job(self.ctx.job(id)?)
            .ok_or(InvariantViolation::NeverDispatched(id))?;
        debug!(
            job = id,
            turnaround = done.turnaround_time,
            wait = done.wait_time,
            "terminated"
        );
        self.stats.record(done);
        Ok(())
    }

    fn make_ready(&mut self, id: JobId, flags: EnqueueFlags) -> Result<(), InvariantViolation> {
        let from = self.ctx.mark_ready(id)?;
        self.record_transition(id, from, JobState::Ready);
        self.scheduler.enqueue(&mut self.ctx, id, flags)
    }

    // Frees the CPU held by the event's job and books the busy interval
    fn release_cpu(&mut self, event: &Event) -> Result<Ticks, InvariantViolation> {
        let ran_for = self
            .ctx
            .clear_cpu(event.job())
            .ok_or_else(|| InvariantViolation::NotOnCpu {
                job: event.job(),
                kind: event.kind(),
                holder: self.ctx.cpu.map(|c| c.job),
            })?;
        self.stats.add_busy(ran_for);
        Ok(ran_for)
    }

    fn record_transition(&mut self, job: JobId, from: JobState, to: JobState) {
        trace!(job, ?from, ?to, now = self.ctx.now, "state change");
        self.observer.record(SchedCoreEvent::JobStateChange {
            time: self.ctx.now,
            job,
            from,
            to,
        });
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn into_parts(self) -> (StatsCollector, Observer) {
        (self.stats, self.observer)
    }
}

// `delta` ticks after `now`, for an event belonging to `job`
fn later(now: Ticks, delta: Ticks, job: JobId) -> Result<Ticks, InvariantViolation> {
    now.checked_add(delta).ok_or(InvariantViolation::ClockOverflow(job))
}
