use chrono::{DateTime, Duration, Utc};

/// One-second countdown schedule owned by a running timed session.
///
/// The timer never fires on its own: the owner polls it with the current
/// time and gets back every tick instant that has come due. Dropping the
/// value cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    next_fire: DateTime<Utc>,
    interval: Duration,
}

impl CountdownTimer {
    pub fn start(now: DateTime<Utc>) -> Self {
        let interval = Duration::seconds(1);
        log::debug!("countdown armed at {now}");
        Self {
            next_fire: now + interval,
            interval,
        }
    }

    pub fn next_fire(&self) -> DateTime<Utc> {
        self.next_fire
    }

    /// Tick instants at or before `now`, oldest first.
    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut fired = Vec::new();
        while self.next_fire <= now {
            fired.push(self.next_fire);
            self.next_fire += self.interval;
        }
        fired
    }

    /// Marks the next slot as delivered by someone else and returns it.
    pub fn consume_next(&mut self) -> DateTime<Utc> {
        let slot = self.next_fire;
        self.next_fire += self.interval;
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(millis: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(millis)
    }

    #[test]
    fn nothing_due_before_first_second() {
        let mut timer = CountdownTimer::start(t(0));
        assert!(timer.due(t(999)).is_empty());
        assert_eq!(timer.next_fire(), t(1000));
    }

    #[test]
    fn fires_on_the_schedule_not_the_poll_time() {
        let mut timer = CountdownTimer::start(t(0));
        assert_eq!(timer.due(t(1200)), vec![t(1000)]);
        assert_eq!(timer.due(t(2050)), vec![t(2000)]);
    }

    #[test]
    fn late_poll_catches_up() {
        let mut timer = CountdownTimer::start(t(500));
        assert_eq!(timer.due(t(3600)), vec![t(1500), t(2500), t(3500)]);
        assert!(timer.due(t(3600)).is_empty());
    }

    #[test]
    fn consumed_slot_is_not_polled_again() {
        let mut timer = CountdownTimer::start(t(0));
        assert_eq!(timer.consume_next(), t(1000));
        assert!(timer.due(t(1500)).is_empty());
        assert_eq!(timer.due(t(2000)), vec![t(2000)]);
    }
}
