//! USB gamepad output: a HID gamepad or an XInput (Xbox 360 wired) pad.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config as UsbConfig};
use gamepad_core::{ButtonReport, ControllerState, OutputError, OutputSink};
use usbd_hid::descriptor::generator_prelude::*;

#[cfg(not(feature = "report-xinput"))]
use embassy_usb::class::hid::{HidWriter, State};
#[cfg(not(feature = "report-xinput"))]
use static_cell::StaticCell;

#[cfg(feature = "report-xinput")]
use embassy_usb::driver::{Direction, EndpointAddress, EndpointIn};

#[cfg(any(
    all(feature = "report-simple", feature = "report-extended"),
    all(feature = "report-simple", feature = "report-xinput"),
    all(feature = "report-extended", feature = "report-xinput"),
))]
compile_error!("features `report-simple`, `report-extended` and `report-xinput` are mutually exclusive");

#[cfg(not(any(
    feature = "report-simple",
    feature = "report-extended",
    feature = "report-xinput"
)))]
compile_error!("enable one of `report-simple`, `report-extended` or `report-xinput`");

/// Eight buttons, one byte: D-pad, SELECT, START, B, A.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = GAMEPAD, ) = {
        (usage_page = BUTTON, usage_min = 1, usage_max = 8) = {
            #[packed_bits 8] #[item_settings data,variable,absolute] buttons = input;
        };
    }
)]
pub struct SimpleGamepadDescriptor {
    pub buttons: u8,
}

/// Twelve buttons plus four padding bits: the eight above, then X, Y, L, R.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = GAMEPAD, ) = {
        (usage_page = BUTTON, usage_min = 1, usage_max = 12) = {
            #[packed_bits 12] #[item_settings data,variable,absolute] buttons = input;
        };
    }
)]
pub struct ExtendedGamepadDescriptor {
    pub buttons: [u8; 2],
}

/// Report layout selected by the `report-*` feature.
#[cfg(feature = "report-simple")]
pub type ActiveReport = gamepad_core::SimpleReport;
#[cfg(feature = "report-xinput")]
pub type ActiveReport = gamepad_core::XInputReport;
#[cfg(not(any(feature = "report-simple", feature = "report-xinput")))]
pub type ActiveReport = gamepad_core::ExtendedReport;

/// Bytes per input report on the wire.
pub const REPORT_SIZE: usize = <ActiveReport as ButtonReport>::SIZE;

/// Report descriptor for the HID layouts.
#[must_use]
pub fn report_descriptor() -> &'static [u8] {
    #[cfg(feature = "report-simple")]
    {
        SimpleGamepadDescriptor::desc()
    }
    #[cfg(not(feature = "report-simple"))]
    {
        ExtendedGamepadDescriptor::desc()
    }
}

/// Vendor interface triple the XInput driver binds to.
#[cfg(feature = "report-xinput")]
const XINPUT_INTERFACE: (u8, u8, u8) = (0xFF, 0x5D, 0x01);

/// Class-specific descriptor (type `0x21`) of a wired Xbox 360 pad's
/// control interface. It names IN endpoint 1 (20-byte reports) and OUT
/// endpoint 1 (8-byte commands).
#[cfg(feature = "report-xinput")]
const XINPUT_CLASS_DESCRIPTOR: [u8; 15] = [
    0x00, 0x01, 0x01, 0x25, 0x81, 0x14, 0x00, 0x00, 0x00, 0x00, 0x13, 0x01, 0x08, 0x00, 0x00,
];

type UsbDriver<'d> = Driver<'d, USB>;

#[cfg(not(feature = "report-xinput"))]
type ReportWriter<'d> = HidWriter<'d, UsbDriver<'d>, REPORT_SIZE>;
#[cfg(feature = "report-xinput")]
type ReportWriter<'d> = <UsbDriver<'d> as embassy_usb::driver::Driver<'d>>::EndpointIn;

#[cfg(not(feature = "report-xinput"))]
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();

/// Device descriptor fields for the selected output.
///
/// XInput hosts bind by vendor and product, so that mode presents itself
/// as a wired Xbox 360 controller.
#[must_use]
pub fn device_config() -> UsbConfig<'static> {
    #[cfg(not(feature = "report-xinput"))]
    let mut config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    #[cfg(feature = "report-xinput")]
    let mut config = {
        let mut config = UsbConfig::new(0x045E, 0x028E);
        config.device_class = 0xFF;
        config.device_sub_class = 0xFF;
        config.device_protocol = 0xFF;
        config.device_release = 0x0114;
        config.composite_with_iads = false;
        config
    };
    config.manufacturer = Some("Rust Gamepad");
    config.product = Some("NES/SNES Mini Controller Adapter");
    config.serial_number = Some("001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;
    config
}

/// USB gamepad output.
///
/// Packs each state into [`ActiveReport`] and writes it to the interrupt
/// IN endpoint of the configured class.
pub struct UsbOutput<'d> {
    writer: ReportWriter<'d>,
    report: [u8; REPORT_SIZE],
    ready: bool,
}

impl<'d> UsbOutput<'d> {
    fn new(writer: ReportWriter<'d>) -> Self {
        Self {
            writer,
            report: [0; REPORT_SIZE],
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        #[cfg(not(feature = "report-xinput"))]
        self.writer.ready().await;
        #[cfg(feature = "report-xinput")]
        self.writer.wait_enabled().await;
        self.ready = true;
    }
}

impl<'d> OutputSink for UsbOutput<'d> {
    async fn send(&mut self, state: &ControllerState) -> Result<(), OutputError> {
        // Disconnected states carry no buttons, so this is the idle report for them.
        let len = ActiveReport::from_buttons(state.buttons).write_to(&mut self.report);
        self.writer
            .write(&self.report[..len])
            .await
            .map_err(|e| match e {
                EndpointError::Disabled => {
                    self.ready = false;
                    OutputError::NotReady
                }
                EndpointError::BufferOverflow => OutputError::Io,
            })
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Add the HID gamepad class to the USB builder.
#[cfg(not(feature = "report-xinput"))]
pub fn configure_usb(builder: &mut Builder<'static, UsbDriver<'static>>) -> UsbOutput<'static> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: report_descriptor(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    let state = HID_STATE.init(State::new());
    UsbOutput::new(HidWriter::new(builder, state, config))
}

/// Add the XInput control interface to the USB builder.
///
/// Only the gamepad interface of a wired pad is presented; the host's
/// rumble and LED commands arrive on the OUT endpoint and are ignored.
#[cfg(feature = "report-xinput")]
pub fn configure_usb(builder: &mut Builder<'static, UsbDriver<'static>>) -> UsbOutput<'static> {
    let (class, sub_class, protocol) = XINPUT_INTERFACE;
    let mut function = builder.function(class, sub_class, protocol);
    let mut interface = function.interface();
    let mut alt = interface.alt_setting(class, sub_class, protocol, None);
    alt.descriptor(0x21, &XINPUT_CLASS_DESCRIPTOR);

    let writer = alt.endpoint_interrupt_in(
        Some(EndpointAddress::from_parts(1, Direction::In)),
        32,
        4,
    );
    let _commands = alt.endpoint_interrupt_out(
        Some(EndpointAddress::from_parts(1, Direction::Out)),
        32,
        8,
    );

    UsbOutput::new(writer)
}
