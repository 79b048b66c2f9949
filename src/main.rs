//! Morse Beacon Application
//!
//! Entry point for the STM32G474 Morse beacon. Keys the status LED line and
//! a PWM sidetone from one polling loop, repeating the beacon text.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::OutputType;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::low_level::CountingMode;
use {defmt_rtt as _, panic_probe as _};

use morse_tx::hal::gpio::key_line;
use morse_tx::hal::pwm::{PwmTone, TonePolarity};
use morse_tx::hal::timer::{PollTicker, UptimeClock};
use morse_tx::morse::ToneKey;
use morse_tx::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Morse Beacon v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Sidetone on TIM3 CH1 (PA6)
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(SIDETONE_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let tone = PwmTone::new(pwm.split().ch1, TonePolarity::Normal);

    let registry = ChannelRegistry::new();

    let key_config = defmt::unwrap!(ChannelConfig::new(
        ChannelKind::RAW_TOGGLE,
        pins::KEY_LINE_ID,
        DEFAULT_WPM,
    ));
    let cw_config = defmt::unwrap!(ChannelConfig::new(
        ChannelKind::RAW_CONTINUOUS_WAVE,
        pins::SIDETONE_ID,
        BEACON_CW_WPM,
    ));

    let key = match registry.configure(key_config, key_line(p.PA5)) {
        Ok(channel) => channel,
        Err(err) => defmt::panic!("key line: {}", err),
    };
    let cw = match registry.configure(cw_config, ToneKey::new(tone)) {
        Ok(channel) => channel,
        Err(err) => defmt::panic!("sidetone: {}", err),
    };
    let mut station = Station::new(key, cw);

    info!(
        "Key line {} on {}, sidetone {}Hz on {}",
        station.key().wpm(),
        pins::KEY_LINE,
        SIDETONE_HZ,
        pins::SIDETONE
    );

    let clock = UptimeClock::new();
    let mut ticker = PollTicker::from_ms(POLL_INTERVAL_MS);

    loop {
        station.submit_both(BEACON_TEXT, clock.now_millis());
        info!("Beacon: {=str}", BEACON_TEXT);

        while !station.is_idle() {
            ticker.next().await;
            station.poll(&clock);
        }

        Timer::after(Duration::from_millis(BEACON_PAUSE_MS)).await;
        ticker.reset();
    }
}
