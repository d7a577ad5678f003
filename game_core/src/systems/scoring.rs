use crate::config::Config;
use crate::resources::*;

/// Credit points to the session and ratchet the spawn interval for every
/// multiple of `ramp_every_points` the score crosses.
pub fn award(
    score: &mut Score,
    schedule: &mut SpawnSchedule,
    config: &Config,
    events: &mut Events,
    points: u32,
) {
    let crossings = score.add(points, config.ramp_every_points);
    events.points += points;

    if crossings > 0 {
        let before = schedule.interval_ms;
        schedule.tighten(crossings, config);
        if schedule.interval_ms != before {
            tracing::debug!(
                score = score.current,
                interval_ms = schedule.interval_ms,
                "obstacle spawn interval tightened"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Score, SpawnSchedule, Config, Events) {
        let config = Config::new();
        (
            Score::new(0),
            SpawnSchedule::new(&config),
            config,
            Events::new(),
        )
    }

    #[test]
    fn test_ramp_once_per_hundred() {
        let (mut score, mut schedule, config, mut events) = setup();

        let mut intervals = Vec::new();
        for _ in 0..10 {
            award(&mut score, &mut schedule, &config, &mut events, 10);
            intervals.push(schedule.interval_ms);
        }

        assert_eq!(score.current, 100);
        assert_eq!(&intervals[..9], &[2000; 9]);
        assert_eq!(intervals[9], 1900);
        assert_eq!(events.points, 100);
    }

    #[test]
    fn test_ramp_counts_crossing_without_exact_hit() {
        let (mut score, mut schedule, config, mut events) = setup();
        award(&mut score, &mut schedule, &config, &mut events, 90);
        award(&mut score, &mut schedule, &config, &mut events, 45);
        assert_eq!(score.current, 135);
        assert_eq!(schedule.interval_ms, 1900);
    }

    #[test]
    fn test_ramp_floor() {
        let (mut score, mut schedule, config, mut events) = setup();
        for _ in 0..40 {
            award(&mut score, &mut schedule, &config, &mut events, 90);
        }
        assert_eq!(schedule.interval_ms, config.spawn_interval_min_ms);
    }

    #[test]
    fn test_zero_points_change_nothing() {
        let (mut score, mut schedule, config, mut events) = setup();
        award(&mut score, &mut schedule, &config, &mut events, 0);
        assert_eq!(score.current, 0);
        assert_eq!(schedule.interval_ms, 2000);
    }
}
