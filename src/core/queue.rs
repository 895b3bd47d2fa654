use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;

use super::state::{JobId, Ticks};

new_key_type! {
    pub struct EventId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,
    Preemption,
    IoRequest,
    IoCompletion,
    Termination,
}

impl EventKind {
    /// Rank among events sharing a timestamp. Jobs becoming ready (arrival,
    /// I/O completion) are admitted before a preempted job rejoins the tail.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Arrival => 0,
            Self::IoCompletion => 1,
            Self::Preemption => 2,
            Self::IoRequest => 3,
            Self::Termination => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Arrival => "ARRIVAL",
            Self::Preemption => "PREEMPTION",
            Self::IoRequest => "IO_REQUEST",
            Self::IoCompletion => "IO_COMPLETION",
            Self::Termination => "TERMINATION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    job: JobId,
    kind: EventKind,
    time: Ticks,
    scheduled_at: Ticks,
}

impl Event {
    pub fn new(job: JobId, kind: EventKind, time: Ticks, scheduled_at: Ticks) -> Self {
        debug_assert!(time >= scheduled_at, "Event scheduled in the past");
        Self {
            job,
            kind,
            time,
            scheduled_at,
        }
    }

    pub fn job(&self) -> JobId {
        self.job
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn time(&self) -> Ticks {
        self.time
    }

    pub fn scheduled_at(&self) -> Ticks {
        self.scheduled_at
    }
}

/// Total order on pending events: time, then kind precedence, then job id.
pub fn event_order(a: &Event, b: &Event) -> Ordering {
    a.time
        .cmp(&b.time)
        .then_with(|| a.kind.precedence().cmp(&b.kind.precedence()))
        .then_with(|| a.job.cmp(&b.job))
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop event_order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Earliest(Event);

impl PartialOrd for Earliest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Earliest {
    fn cmp(&self, other: &Self) -> Ordering {
        event_order(&other.0, &self.0)
    }
}

#[derive(Debug)]
pub struct EventQueue {
    events: SlotMap<EventId, Event>,
    pending: KeyedPriorityQueue<EventId, Earliest>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: SlotMap::with_key(),
            pending: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, event: Event) -> EventId {
        let id = self.events.insert(event);
        self.pending.push(id, Earliest(event));
        id
    }

    pub fn pop_min(&mut self) -> Option<Event> {
        let (id, _) = self.pending.pop()?;
        self.events.remove(id)
    }

    pub fn peek_min(&self) -> Option<&Event> {
        let (id, _) = self.pending.peek()?;
        self.events.get(*id)
    }

    pub fn peek_min_time(&self) -> Option<Ticks> {
        self.peek_min().map(Event::time)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(job: JobId, kind: EventKind, time: Ticks) -> Event {
        Event::new(job, kind, time, 0)
    }

    fn drain(queue: &mut EventQueue) -> Vec<(Ticks, EventKind, JobId)> {
        std::iter::from_fn(|| queue.pop_min())
            .map(|e| (e.time(), e.kind(), e.job()))
            .collect()
    }

    #[test]
    fn earlier_time_wins() {
        let a = ev(9, EventKind::Termination, 3);
        let b = ev(1, EventKind::Arrival, 4);
        assert_eq!(event_order(&a, &b), Ordering::Less);
        assert_eq!(event_order(&b, &a), Ordering::Greater);
    }

    #[test]
    fn kind_precedence_breaks_time_ties() {
        use EventKind::*;
        let order = [Arrival, IoCompletion, Preemption, IoRequest, Termination];
        for pair in order.windows(2) {
            let a = ev(5, pair[0], 10);
            let b = ev(1, pair[1], 10);
            assert_eq!(event_order(&a, &b), Ordering::Less, "{pair:?}");
        }
    }

    #[test]
    fn job_id_breaks_remaining_ties() {
        let a = ev(2, EventKind::Arrival, 0);
        let b = ev(3, EventKind::Arrival, 0);
        assert_eq!(event_order(&a, &b), Ordering::Less);
        assert_eq!(event_order(&a, &a), Ordering::Equal);
    }

    #[test]
    fn pops_in_order_regardless_of_insertion() {
        use EventKind::*;
        let events = [
            ev(2, Arrival, 0),
            ev(1, Termination, 4),
            ev(4, Preemption, 4),
            ev(1, Arrival, 0),
            ev(3, IoCompletion, 4),
            ev(2, IoRequest, 4),
            ev(5, Arrival, 2),
        ];
        let expected = vec![
            (0, Arrival, 1),
            (0, Arrival, 2),
            (2, Arrival, 5),
            (4, IoCompletion, 3),
            (4, Preemption, 4),
            (4, IoRequest, 2),
            (4, Termination, 1),
        ];

        let mut forward = EventQueue::new();
        events.iter().for_each(|e| {
            forward.push(*e);
        });
        let mut backward = EventQueue::new();
        events.iter().rev().for_each(|e| {
            backward.push(*e);
        });

        assert_eq!(drain(&mut forward), expected);
        assert_eq!(drain(&mut backward), expected);
    }

    #[test]
    fn peek_and_len() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_min_time(), None);
        assert_eq!(queue.pop_min(), None);

        queue.push(ev(1, EventKind::IoCompletion, 7));
        queue.push(ev(2, EventKind::Arrival, 3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_min_time(), Some(3));

        assert_eq!(queue.pop_min().map(|e| e.job()), Some(2));
        assert_eq!(queue.peek_min_time(), Some(7));
        assert_eq!(queue.len(), 1);
    }
}
