//! Stele firmware for the LilyGo T5 4.7" e-paper board (ESP32-S3).
//!
//! Boot sequence: allocator, embassy time driver, WiFi association,
//! DHCP, then the dashboard loop. Each cycle fetches the fact stream
//! from the configured server, redraws the panel and sleeps for the
//! configured interval. A failed fetch still redraws with the facts
//! from the previous cycle.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::Timer;
use esp_backtrace as _;
use esp_hal::clock::ClockControl;
use esp_hal::delay::Delay;
use esp_hal::gpio::Io;
use esp_hal::peripherals::Peripherals;
use esp_hal::rng::Rng;
use esp_hal::system::SystemControl;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use esp_wifi::wifi::{WifiDevice, WifiStaDevice};
use esp_wifi::EspWifiInitFor;
use lilygo_epd47::Display;
use static_cell::StaticCell;
use stele_core::{parse_config, DashboardConfig, Renderer};
use stele_display::Mono8x8;
use stele_protocol::{FactTable, RecordParser};

mod net;
mod panel;

use crate::panel::Ed047Panel;

/// Configuration compiled into the firmware. Edit `stele.toml` at the
/// crate root and reflash to change it.
const EMBEDDED_CONFIG: &str = include_str!("../stele.toml");

static CONFIG: StaticCell<DashboardConfig> = StaticCell::new();
static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();
static STACK: StaticCell<Stack<WifiDevice<'static, WifiStaDevice>>> = StaticCell::new();

fn load_config() -> DashboardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("embedded config rejected ({:?}), using defaults", e);
            DashboardConfig::default()
        }
    }
}

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    let peripherals = Peripherals::take();
    let system = SystemControl::new(peripherals.SYSTEM);
    let clocks = ClockControl::max(system.clock_control).freeze();

    // The 960x540 4-bpp framebuffer lives on the heap, so the
    // allocator has to cover PSRAM.
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0, &clocks);
    esp_hal_embassy::init(&clocks, timg0.timer0);

    info!("stele firmware starting");
    let config = &*CONFIG.init(load_config());

    let mut rng = Rng::new(peripherals.RNG);
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let timg1 = TimerGroup::new(peripherals.TIMG1, &clocks);
    let wifi_init = match esp_wifi::initialize(
        EspWifiInitFor::Wifi,
        timg1.timer0,
        rng,
        peripherals.RADIO_CLK,
        &clocks,
    ) {
        Ok(init) => init,
        Err(_) => {
            error!("wifi radio init failed");
            halt().await
        }
    };
    let (device, controller) =
        match esp_wifi::wifi::new_with_mode(&wifi_init, peripherals.WIFI, WifiStaDevice) {
            Ok(pair) => pair,
            Err(_) => {
                error!("wifi interface init failed");
                halt().await
            }
        };

    let stack = &*STACK.init(Stack::new(
        device,
        NetConfig::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    ));

    spawner.must_spawn(net::connection(controller, &config.network));
    spawner.must_spawn(net::net_task(stack));

    info!("waiting for DHCP");
    while !stack.is_config_up() {
        Timer::after_millis(100).await;
    }
    if let Some(v4) = stack.config_v4() {
        info!("got address {}", v4.address);
    }

    let io = Io::new(peripherals.GPIO, peripherals.IO_MUX);
    let display = Display::new(
        io,
        peripherals.DMA,
        peripherals.LCD_CAM,
        peripherals.RMT,
        &clocks,
    );
    let mut panel = Ed047Panel::new(display, Delay::new(&clocks));

    let mut renderer = Renderer::new(Mono8x8);
    let mut parser = RecordParser::new();
    let mut facts = FactTable::new();

    loop {
        match net::fetch(stack, &config.server, &mut parser, &mut facts).await {
            Ok(count) => info!("merged {} record(s)", count),
            Err(e) => warn!("fetch failed: {:?}", e),
        }

        // Stale facts still beat a blank panel.
        if let Err(e) = renderer.render(&facts, &mut panel) {
            error!("render failed: {:?}", e);
        }

        Timer::after_secs(config.poll_interval_s as u64).await;
    }
}

async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
