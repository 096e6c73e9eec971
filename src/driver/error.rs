//! Error types for the ethoc driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Invalid construction parameters
//! - [`DmaError`]: Buffer pool acquisition failures
//! - [`PhyError`]: PHY bring-up failures
//! - [`IoError`]: Frames the rings cannot describe
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by driver construction. A full TX ring is not an error; see
//! [`TxStatus::Retry`](crate::TxStatus::Retry).

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Detected before any register is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// MAC address is a group address
    InvalidMacAddress,
    /// MII clock divider of zero
    InvalidClockDivider,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidMacAddress => "MAC address is not unicast",
            ConfigError::InvalidClockDivider => "invalid MII clock divider",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Buffer pool errors
///
/// All of these are fatal for construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Neither an I/O memory window nor DMA memory could be obtained
    PoolUnavailable,
    /// Device-visible address range does not fit in 32 bits
    AddressOutOfRange,
    /// Region smaller than the rings need
    PoolTooSmall,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::PoolUnavailable => "no DMA memory available",
            DmaError::AddressOutOfRange => "DMA address exceeds 32 bits",
            DmaError::PoolTooSmall => "DMA region too small for rings",
        }
    }
}

// =============================================================================
// PHY Errors
// =============================================================================

/// PHY bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyError {
    /// Reset bit never cleared
    ResetTimeout,
    /// Link never came up after duplex/speed setup
    LinkTimeout,
}

impl core::fmt::Display for PhyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PhyError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhyError::ResetTimeout => "PHY reset failed",
            PhyError::LinkTimeout => "PHY duplex/speed setup failed",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX errors
///
/// Returned for frames no descriptor can carry. These are caller bugs,
/// unlike a full ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Empty frame
    InvalidLength,
    /// Frame larger than one buffer slot
    FrameTooLarge,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::InvalidLength => "invalid frame length",
            IoError::FrameTooLarge => "frame too large for buffer slot",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match Ethoc::<64, 64>::new(regs, &windows, &mut alloc, config, &mut delay) {
///     Err(Error::Phy(PhyError::LinkTimeout)) => { /* cable unplugged? */ }
///     Err(Error::Dma(DmaError::PoolUnavailable)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// PHY error
    Phy(PhyError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Phy(e) => write!(f, "phy: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<PhyError> for Error {
    fn from(e: PhyError) -> Self {
        Error::Phy(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for buffer pool operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for PHY bring-up
pub type PhyResult<T> = core::result::Result<T, PhyError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
