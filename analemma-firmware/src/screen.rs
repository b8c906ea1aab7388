//! ST7789 panel over SPI
//!
//! Brings up the LCD with mipidsi and exposes it through the
//! `DisplayBackend` seam the face composites into.

use analemma_core::layout;
use analemma_display::{DisplayBackend, DisplayError};
use embassy_rp::gpio::Output;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_graphics::prelude::*;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use static_cell::ConstStaticCell;

type PanelSpi = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>;
type PanelInterface = SpiInterface<'static, PanelSpi, Output<'static>>;

/// The panel, ready to draw on with `embedded-graphics`
pub type Panel = mipidsi::Display<PanelInterface, ST7789, Output<'static>>;

/// Pixel staging buffer for the SPI interface
static SPI_BUFFER: ConstStaticCell<[u8; 512]> = ConstStaticCell::new([0; 512]);

/// The physical screen behind the `DisplayBackend` seam
pub struct Screen {
    panel: Panel,
}

impl Screen {
    /// Initialize the panel and clear it to the window background
    pub fn new(
        bus: Spi<'static, Blocking>,
        dc: Output<'static>,
        cs: Output<'static>,
        rst: Output<'static>,
    ) -> Self {
        let mut delay = Delay;

        let device = ExclusiveDevice::new(bus, cs, Delay).unwrap();
        let interface = SpiInterface::new(device, dc, SPI_BUFFER.take());

        let mut panel = mipidsi::Builder::new(ST7789, interface)
            .reset_pin(rst)
            .display_size(
                layout::SCREEN_SIZE.width as u16,
                layout::SCREEN_SIZE.height as u16,
            )
            .init(&mut delay)
            .unwrap();

        let _ = panel.clear(layout::BACKGROUND);
        Self { panel }
    }
}

impl DisplayBackend for Screen {
    type Target = Panel;

    fn target(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // mipidsi pushes pixels on draw; nothing buffered to present
        Ok(())
    }
}
