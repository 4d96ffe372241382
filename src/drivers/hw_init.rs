//! One-shot hardware peripheral initialization and bus helpers.
//!
//! Configures GPIO directions and the display SPI bus using raw ESP-IDF
//! sys calls, and exposes the thin write helpers the drivers build on.
//! Called once from `main()` before the event loop starts.
//!
//! Chip select for the display chain is a plain GPIO rather than the SPI
//! peripheral's hardware CS: a broadcast write must hold one select
//! window while the 2-byte frame is repeated for every cascaded module.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real GPIO and SPI register writes. On host/test: GPIO
//! writes are no-ops and SPI writes land in an inspectable trace.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Number of cascaded MAX7219 modules on the display chain.
pub const NUM_DISPLAY_MODULES: usize = 1;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: called once from main() before the event loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_spi()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [
        pins::LOW_TEMP_LED_GPIO,
        pins::HIGH_TEMP_LED_GPIO,
        pins::LOW_HUM_LED_GPIO,
        pins::HEAT_MAT_GPIO,
        pins::SPI_CS_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            log::error!("hw_init: GPIO {} config failed (rc={})", pin, ret);
            return Err(Error::Init("GPIO output config failed"));
        }
        // LEDs and the relay start low; chip select idles high (active low).
        let idle = i32::from(pin == pins::SPI_CS_GPIO);
        unsafe { gpio_set_level(pin, idle as u32) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Display SPI bus ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut SPI_DEVICE: spi_device_handle_t = core::ptr::null_mut();

/// SAFETY: SPI_DEVICE is written once in `init_spi()` before the event
/// loop starts; only the single main task reads it afterwards.
#[cfg(target_os = "espidf")]
unsafe fn spi_device() -> spi_device_handle_t {
    unsafe { SPI_DEVICE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_spi() -> Result<()> {
    let bus_cfg = spi_bus_config_t {
        __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
            mosi_io_num: pins::SPI_MOSI_GPIO,
        },
        __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 { miso_io_num: -1 },
        sclk_io_num: pins::SPI_SCK_GPIO,
        __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
        __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
        ..Default::default()
    };
    // SAFETY: one-shot bus bring-up from the single main task.
    let ret = unsafe {
        spi_bus_initialize(
            spi_host_device_t_SPI2_HOST,
            &bus_cfg,
            spi_common_dma_t_SPI_DMA_DISABLED,
        )
    };
    if ret != ESP_OK as i32 {
        log::error!("hw_init: SPI bus init failed (rc={})", ret);
        return Err(Error::Init("SPI bus init failed"));
    }

    let dev_cfg = spi_device_interface_config_t {
        clock_speed_hz: pins::DISPLAY_SPI_HZ as i32,
        mode: 0,
        // CS is driven manually so bursts can frame multiple transfers.
        spics_io_num: -1,
        queue_size: 1,
        ..Default::default()
    };
    // SAFETY: SPI_DEVICE is only written here, once at boot.
    let ret = unsafe {
        spi_bus_add_device(spi_host_device_t_SPI2_HOST, &dev_cfg, &raw mut SPI_DEVICE)
    };
    if ret != ESP_OK as i32 {
        log::error!("hw_init: SPI device add failed (rc={})", ret);
        return Err(Error::Init("SPI device add failed"));
    }

    info!(
        "hw_init: SPI2 configured ({} Hz, manual CS on GPIO {})",
        pins::DISPLAY_SPI_HZ,
        pins::SPI_CS_GPIO
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
fn spi_transmit(frame: [u8; 2]) {
    let mut txn = spi_transaction_t {
        length: 16, // bits
        ..Default::default()
    };
    txn.__bindgen_anon_1.tx_buffer = frame.as_ptr().cast();
    // SAFETY: spi_device() contract — handle valid after init_spi(),
    // single main-task access; txn and frame outlive the blocking call.
    let ret = unsafe { spi_device_polling_transmit(spi_device(), &mut txn) };
    if ret != ESP_OK as i32 {
        log::error!("hw_init: SPI transmit failed (rc={})", ret);
    }
}

/// One register write broadcast to every cascaded display module inside a
/// single chip-select window; no settling delay (digit-refresh bursts).
#[cfg(target_os = "espidf")]
pub fn display_write_fast(reg: u8, data: u8) {
    gpio_write(pins::SPI_CS_GPIO, false);
    for _ in 0..NUM_DISPLAY_MODULES {
        spi_transmit([reg, data]);
    }
    gpio_write(pins::SPI_CS_GPIO, true);
}

/// Broadcast register write followed by a settling delay. Used for the
/// one-shot init sequence and clears, where margin beats latency.
#[cfg(target_os = "espidf")]
pub fn display_write(reg: u8, data: u8) {
    display_write_fast(reg, data);
    std::thread::sleep(std::time::Duration::from_millis(1));
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Mutex;

    /// Every display register write in order, as (register, data) pairs.
    pub(super) static SPI_TRACE: Mutex<Vec<(u8, u8)>> = Mutex::new(Vec::new());
}

#[cfg(not(target_os = "espidf"))]
pub fn display_write_fast(reg: u8, data: u8) {
    if let Ok(mut trace) = sim::SPI_TRACE.lock() {
        trace.push((reg, data));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn display_write(reg: u8, data: u8) {
    display_write_fast(reg, data);
}

/// Drain the recorded display register writes (host/test builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_take_spi_writes() -> Vec<(u8, u8)> {
    sim::SPI_TRACE
        .lock()
        .map(|mut trace| std::mem::take(&mut *trace))
        .unwrap_or_default()
}
