mod common;

mod tests {
    use crate::common::{Recorder, at};
    use pico_actuators::{
        Actuator, Bounds, CancelToken, Duration, Error, HardwareError, Instant, Plan, PollError,
        Poller, RunReport, Update,
    };

    const TICK: Duration = Duration::from_millis(10);

    /// Clock advancing 10 ms per reading
    fn stepping_clock() -> impl FnMut() -> Instant {
        let mut t = 0;
        move || {
            t += 10;
            at(t)
        }
    }

    /// Member that cancels the run after a number of passes
    struct Countdown<'t> {
        token: &'t CancelToken,
        left: u32,
    }

    impl Update for Countdown<'_> {
        fn update(&mut self, _now: Instant) -> Result<bool, HardwareError> {
            self.left = self.left.saturating_sub(1);
            if self.left == 0 {
                self.token.cancel();
            }
            Ok(false)
        }
    }

    #[test]
    fn test_run_for_counts_steps() {
        let mut sweep = Actuator::new(Recorder::<i32>::new(), 0);
        sweep
            .configure(&Plan::sweep(0, 30, 10, TICK), at(0))
            .unwrap();
        let mut fade = Actuator::new(Recorder::<i32>::new(), 0);
        fade.configure(&Plan::fade(Bounds::new(0, 20), 10, TICK), at(0))
            .unwrap();

        let mut poller: Poller<'_, 4> = Poller::new();
        poller.add(&mut sweep).ok();
        poller.add(&mut fade).ok();
        assert_eq!(poller.len(), 2);

        let report = poller.run_for(stepping_clock(), 5).unwrap();
        assert_eq!(
            report,
            RunReport {
                iterations: 5,
                steps: 3 + 5,
            }
        );
        drop(poller);

        assert_eq!(sweep.current(), 30);
        assert!(sweep.is_idle());
        assert_eq!(fade.current(), 10);
    }

    #[test]
    fn test_tick_respects_member_intervals() {
        let mut fast = Actuator::new(Recorder::<i32>::new(), 0);
        fast.configure(&Plan::fade(Bounds::new(0, 100), 1, TICK), at(0))
            .unwrap();
        let mut slow = Actuator::new(Recorder::<i32>::new(), 0);
        slow.configure(
            &Plan::fade(Bounds::new(0, 100), 1, Duration::from_millis(30)),
            at(0),
        )
        .unwrap();

        let mut poller: Poller<'_, 2> = Poller::new();
        poller.add(&mut fast).ok();
        poller.add(&mut slow).ok();
        let report = poller.run_for(stepping_clock(), 9).unwrap();
        assert_eq!(report.steps, 9 + 3);
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut a = Actuator::new(Recorder::<u8>::new(), 0);
        let mut b = Actuator::new(Recorder::<u8>::new(), 0);

        let mut poller: Poller<'_, 1> = Poller::default();
        assert!(poller.is_empty());
        assert!(poller.add(&mut a).is_ok());
        assert!(poller.add(&mut b).is_err());
        assert_eq!(poller.len(), 1);
    }

    #[test]
    fn test_failure_reports_member_index() {
        let mut healthy = Actuator::new(Recorder::<i32>::new(), 0);
        healthy
            .configure(&Plan::fade(Bounds::new(0, 100), 10, TICK), at(0))
            .unwrap();
        let broken_output = Recorder::<i32>::new();
        let mut broken = Actuator::new(broken_output.clone(), 0i32);
        broken
            .configure(&Plan::fade(Bounds::new(0, 100), 10, TICK), at(0))
            .unwrap();
        broken_output.fail.set(true);

        let mut poller: Poller<'_, 2> = Poller::new();
        poller.add(&mut healthy).ok();
        poller.add(&mut broken).ok();

        let error = poller.run_for(stepping_clock(), 3).unwrap_err();
        assert_eq!(
            error,
            PollError {
                member: 1,
                error: HardwareError::PwmWrite,
            }
        );
        assert_eq!(Error::from(error), Error::Hardware(HardwareError::PwmWrite));
        drop(poller);

        assert_eq!(healthy.current(), 10);
        assert_eq!(broken.current(), 0);
    }

    #[test]
    fn test_failed_member_retries_next_pass() {
        let output = Recorder::<i32>::new();
        let mut actuator = Actuator::new(output.clone(), 0i32);
        actuator
            .configure(&Plan::sweep(0, 20, 10, TICK), at(0))
            .unwrap();

        let mut poller: Poller<'_, 1> = Poller::new();
        poller.add(&mut actuator).ok();

        output.fail.set(true);
        assert!(poller.tick(at(10)).is_err());
        output.fail.set(false);
        assert_eq!(poller.tick(at(10)), Ok(1));
        assert_eq!(poller.tick(at(20)), Ok(1));
        assert_eq!(poller.tick(at(30)), Ok(0));
        assert_eq!(output.values(), [0, 10, 20]);
    }

    #[test]
    fn test_run_until_cancelled() {
        let token = CancelToken::new();
        let mut countdown = Countdown {
            token: &token,
            left: 4,
        };
        let mut led = Actuator::new(Recorder::<u8>::new(), 0);
        led.configure(&Plan::blink(100, 0, TICK, None), at(0))
            .unwrap();

        let mut poller: Poller<'_, 2> = Poller::new();
        poller.add(&mut led).ok();
        poller.add(&mut countdown).ok();

        let report = poller.run_until(stepping_clock(), &token).unwrap();
        assert_eq!(
            report,
            RunReport {
                iterations: 4,
                steps: 4,
            }
        );
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_until_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let mut led = Actuator::new(Recorder::<u8>::new(), 0);

        let mut poller: Poller<'_, 1> = Poller::new();
        poller.add(&mut led).ok();
        let report = poller.run_until(stepping_clock(), &token).unwrap();
        assert_eq!(report, RunReport::default());

        token.reset();
        assert!(!token.is_cancelled());
    }
}
