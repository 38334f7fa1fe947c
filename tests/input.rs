mod common;

mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use crate::common::{MockDelay, MockPin, at};
    use pico_actuators::input::{
        EchoSensor, HcSr04, LevelSource, Rangefinder, RangefinderConfig, SoundTrigger,
        ToggleButton, echo_timeout_us,
    };
    use pico_actuators::{Duration, HardwareError};

    /// Echo sensor replaying scripted readings
    #[derive(Clone, Default)]
    struct FakeEcho {
        readings: Rc<RefCell<VecDeque<Result<Option<u32>, HardwareError>>>>,
        timeouts: Rc<RefCell<Vec<u32>>>,
    }

    impl FakeEcho {
        fn push(&self, reading: Result<Option<u32>, HardwareError>) {
            self.readings.borrow_mut().push_back(reading);
        }
    }

    impl EchoSensor for FakeEcho {
        fn echo_us(&mut self, timeout_us: u32) -> Result<Option<u32>, HardwareError> {
            self.timeouts.borrow_mut().push(timeout_us);
            self.readings.borrow_mut().pop_front().unwrap_or(Ok(None))
        }
    }

    /// Analogue source replaying scripted samples, failing once exhausted
    #[derive(Clone, Default)]
    struct FakeAdc {
        samples: Rc<RefCell<VecDeque<u16>>>,
    }

    impl FakeAdc {
        fn with(samples: &[u16]) -> Self {
            let adc = Self::default();
            adc.samples.borrow_mut().extend(samples);
            adc
        }
    }

    impl LevelSource for FakeAdc {
        fn read_u16(&mut self) -> Result<u16, HardwareError> {
            self.samples
                .borrow_mut()
                .pop_front()
                .ok_or(HardwareError::AdcRead)
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_echo_timeout_covers_round_trip() {
        assert_eq!(echo_timeout_us(400), 23_323);
        assert_eq!(echo_timeout_us(0), 0);
        assert!(echo_timeout_us(u16::MAX) > echo_timeout_us(400));
    }

    #[test]
    fn test_hc_sr04_measures_pulse_width() {
        let (trigger, echo, delay) = (MockPin::new(), MockPin::new(), MockDelay::default());
        let mut sensor = HcSr04::new(trigger.clone(), echo.clone(), delay.clone());

        echo.push_input(false, 3);
        // the first high sample ends the wait for the rising edge
        echo.push_input(true, 59);
        assert_eq!(sensor.echo_us(1000), Ok(Some(58)));
        assert_eq!(*trigger.levels.borrow(), [false, true, false]);
        assert_eq!(delay.total_ns.get(), (2 + 10 + 3 + 58) * 1000);
    }

    #[test]
    fn test_hc_sr04_times_out_without_echo() {
        let (trigger, echo, delay) = (MockPin::new(), MockPin::new(), MockDelay::default());
        let mut sensor = HcSr04::new(trigger, echo.clone(), delay);

        assert_eq!(sensor.echo_us(50), Ok(None));

        echo.set_input(true);
        assert_eq!(sensor.echo_us(50), Ok(None));
    }

    #[test]
    fn test_hc_sr04_read_failure() {
        let (trigger, echo, delay) = (MockPin::new(), MockPin::new(), MockDelay::default());
        let mut sensor = HcSr04::new(trigger.clone(), echo.clone(), delay);

        echo.fail.set(true);
        assert_eq!(sensor.echo_us(50), Err(HardwareError::GpioRead));
        trigger.fail.set(true);
        assert_eq!(sensor.echo_us(50), Err(HardwareError::GpioWrite));
    }

    #[test]
    fn test_rangefinder_refreshes_on_interval() {
        let echo = FakeEcho::default();
        let mut finder = Rangefinder::new(echo.clone(), RangefinderConfig::default(), at(0));
        assert_eq!(finder.timeout_us(), 23_323);

        echo.push(Ok(Some(583)));
        assert_eq!(finder.update(at(50)), Ok(false));
        assert!(echo.timeouts.borrow().is_empty());

        assert_eq!(finder.update(at(100)), Ok(true));
        assert_close(finder.distance_cm(), 9.998_45);
        assert_close(finder.distance_mm(), 99.984_5);
        assert!(finder.near(10.0));
        assert!(!finder.near(5.0));
        assert_eq!(*echo.timeouts.borrow(), [23_323]);
    }

    #[test]
    fn test_rangefinder_keeps_distance_on_lost_echo() {
        let echo = FakeEcho::default();
        let mut finder = Rangefinder::new(echo.clone(), RangefinderConfig::default(), at(0));

        echo.push(Ok(Some(1000)));
        echo.push(Ok(None));
        echo.push(Ok(Some(0)));
        finder.update(at(100)).unwrap();
        assert_eq!(finder.update(at(200)), Ok(false));
        assert_eq!(finder.update(at(300)), Ok(false));
        assert_close(finder.distance_cm(), 17.15);

        // lost echoes still consume the interval
        assert_eq!(finder.update(at(350)), Ok(false));
        assert_eq!(echo.timeouts.borrow().len(), 3);
    }

    #[test]
    fn test_rangefinder_retries_after_error() {
        let echo = FakeEcho::default();
        let mut finder = Rangefinder::new(echo.clone(), RangefinderConfig::default(), at(0));

        echo.push(Err(HardwareError::GpioRead));
        echo.push(Ok(Some(2000)));
        assert_eq!(finder.update(at(100)), Err(HardwareError::GpioRead));
        assert_eq!(finder.update(at(101)), Ok(true));
        assert_close(finder.distance_cm(), 34.3);
    }

    #[test]
    fn test_rangefinder_before_first_echo() {
        let finder = Rangefinder::new(FakeEcho::default(), RangefinderConfig::default(), at(0));
        assert_eq!(finder.distance_cm(), 0.0);
        assert!(!finder.near(100.0));
    }

    #[test]
    fn test_rangefinder_interval_change() {
        let echo = FakeEcho::default();
        let mut finder = Rangefinder::new(echo.clone(), RangefinderConfig::default(), at(0));

        finder.set_interval(Duration::from_millis(500), at(50));
        assert_eq!(finder.interval(), Duration::from_millis(500));
        echo.push(Ok(Some(100)));
        assert_eq!(finder.update(at(500)), Ok(false));
        assert_eq!(finder.update(at(550)), Ok(true));
    }

    #[test]
    fn test_rangefinder_average_skips_lost_echoes() {
        let echo = FakeEcho::default();
        let mut finder = Rangefinder::new(echo.clone(), RangefinderConfig::default(), at(0));
        let mut delay = MockDelay::default();

        echo.push(Ok(Some(100)));
        echo.push(Ok(None));
        echo.push(Ok(Some(300)));
        let average = finder
            .average(3, Duration::from_millis(60), &mut delay)
            .unwrap();
        assert_close(average.unwrap(), 3.43);
        assert_eq!(delay.total_ns.get(), 3 * 60_000_000);

        assert_eq!(finder.average(2, Duration::from_millis(0), &mut delay), Ok(None));
    }

    #[test]
    fn test_sound_trigger_threshold() {
        let adc = FakeAdc::with(&[1000, 1150, 950, 900]);
        let mut sound =
            SoundTrigger::new(adc.clone(), 100, Duration::from_millis(500), at(0)).unwrap();
        assert_eq!(sound.baseline(), 1000);

        assert_eq!(sound.update(at(100)), Ok(false));
        assert_eq!(sound.update(at(500)), Ok(true));
        assert!(sound.is_triggered());
        assert_eq!(sound.last_difference(), 150);

        assert_eq!(sound.update(at(1000)), Ok(true));
        assert!(!sound.is_triggered());
        assert_eq!(sound.last_difference(), 50);

        sound.set_threshold(99);
        assert_eq!(sound.update(at(1500)), Ok(true));
        assert!(sound.is_triggered());
    }

    #[test]
    fn test_sound_trigger_recalibrate_and_errors() {
        let adc = FakeAdc::with(&[500, 900]);
        let mut sound =
            SoundTrigger::new(adc.clone(), 100, Duration::from_millis(500), at(0)).unwrap();

        sound.recalibrate().unwrap();
        assert_eq!(sound.baseline(), 900);
        assert_eq!(sound.update(at(500)), Err(HardwareError::AdcRead));

        adc.samples.borrow_mut().push_back(905);
        assert_eq!(sound.update(at(501)), Ok(true));
        assert!(!sound.is_triggered());

        assert!(SoundTrigger::new(FakeAdc::default(), 1, Duration::from_millis(1), at(0)).is_err());
    }

    #[test]
    fn test_toggle_button_debounces_presses() {
        let pin = MockPin::new();
        pin.set_input(true);
        let mut button = ToggleButton::new(pin.clone(), Duration::from_millis(200), at(0));

        pin.push_input(false, 1);
        assert_eq!(button.update(at(100)), Ok(false));
        assert!(!button.state());

        pin.push_input(false, 1);
        assert_eq!(button.update(at(250)), Ok(true));
        assert!(button.state());

        pin.push_input(false, 1);
        assert_eq!(button.update(at(300)), Ok(false));
        assert!(button.state());

        assert_eq!(button.update(at(500)), Ok(false));
        pin.push_input(false, 1);
        assert_eq!(button.update(at(500)), Ok(true));
        assert!(!button.state());
    }

    #[test]
    fn test_toggle_button_read_failure() {
        let pin = MockPin::new();
        let mut button = ToggleButton::new(pin.clone(), Duration::from_millis(200), at(0));

        pin.fail.set(true);
        assert_eq!(button.update(at(1000)), Err(HardwareError::GpioRead));
        assert!(!button.state());
    }
}
