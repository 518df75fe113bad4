#![no_std]
#![no_main]

use defmt::{debug, error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_rp::watchdog::Watchdog;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Ticker};
use embassy_usb::Builder;
use nes_mini_to_gamepad::{
    configure_usb, device_config, BitBangI2c, ControllerBridge, ControllerState, FlexLines,
    NesMiniController, OutputSink, SignalOutput, StateSignal, UsbOutput,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Time between the starts of two poll cycles. A cycle itself takes about
/// 11 ms (10 ms latch plus bus traffic).
const POLL_PERIOD: Duration = Duration::from_millis(16);

/// Reset if the input task stops feeding, e.g. a peer holding SCL low.
const WATCHDOG_PERIOD: Duration = Duration::from_secs(1);

type Controller = NesMiniController<BitBangI2c<FlexLines<'static>, Delay>, Delay>;
type Bridge = ControllerBridge<Controller, SignalOutput>;

/// Signal for passing controller state from input to output task.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// which is appropriate for button state where we only care about the most recent poll.
static STATE_SIGNAL: StaticCell<StateSignal> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NES-Mini-to-Gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.pause_on_debug(true);
    watchdog.start(WATCHDOG_PERIOD);

    // Initialize the controller state signal (latest-value semantics)
    let signal: &'static StateSignal = STATE_SIGNAL.init(Signal::new());

    // --- Controller bus: SDA on GPIO 4, SCL on GPIO 5 ---
    let lines = FlexLines::new(Flex::new(p.PIN_5), Flex::new(p.PIN_4));
    let bus = BitBangI2c::new(lines, Delay);
    let controller = NesMiniController::new(bus, Delay);
    let bridge = ControllerBridge::new(controller, SignalOutput::new(signal));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);
    let usb_config = device_config();

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure the gamepad class selected by the `report-*` feature
    let usb_output = configure_usb(&mut builder);

    // Build the USB device
    let usb_device = builder.build();

    // On-board LED: lit while no controller answers, otherwise while a button is held
    let led = Output::new(p.PIN_25, Level::High);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(input_task(bridge, watchdog, led).unwrap());
    spawner.spawn(output_task(usb_output, signal).unwrap());

    info!("NES-Mini-to-Gamepad initialized, waiting for controller...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Input task - polls the controller and signals the latest state.
#[embassy_executor::task]
async fn input_task(mut bridge: Bridge, mut watchdog: Watchdog, mut led: Output<'static>) {
    let mut ticker = Ticker::every(POLL_PERIOD);
    let mut last = ControllerState::neutral();

    loop {
        watchdog.feed();

        // A missing controller is logged by the source and forwarded as neutral.
        let state = match bridge.process_one().await {
            Ok(state) => state,
            Err(_) => ControllerState::neutral(),
        };

        if state.buttons != last.buttons {
            debug!("buttons: {=u16:#06x}", state.buttons.raw());
        }
        last = state;

        if !state.connected || !state.buttons.is_empty() {
            led.set_high();
        } else {
            led.set_low();
        }

        ticker.next().await;
    }
}

/// Output task - waits for state signals and sends to USB.
#[embassy_executor::task]
async fn output_task(mut output: UsbOutput<'static>, signal: &'static StateSignal) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB ready, forwarding controller state...");

    loop {
        // Wait for the next controller state (blocks until signaled)
        let state = signal.wait().await;
        if let Err(e) = output.send(&state).await {
            error!("Output error: {:?}", e);
            if !output.is_ready() {
                output.wait_ready().await;
            }
        }
    }
}
