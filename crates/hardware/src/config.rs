//! Configuration system for the MIPS pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** The MU-MIPS memory map (text, data, stack, kernel text, kernel data).
//! 2. **Structures:** General options (tracing, text base) and the memory region list.
//! 3. **Validation:** Rejection of empty, overlapping, or out-of-range regions.
//!
//! Configuration is supplied as JSON (`mu-mips --config sim.json`) or taken from
//! `Config::default()`.

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the MU-MIPS memory map when not overridden.
mod defaults {
    /// Base address of the user text segment, where programs are loaded.
    pub const TEXT_BASE: u32 = 0x0040_0000;

    /// Base address of the user data segment.
    pub const DATA_BASE: u32 = 0x1000_0000;

    /// Base address of the stack segment.
    pub const STACK_BASE: u32 = 0x7FF0_0000;

    /// Base address of the kernel text segment.
    pub const KTEXT_BASE: u32 = 0x8000_0000;

    /// Base address of the kernel data segment.
    pub const KDATA_BASE: u32 = 0x9000_0000;

    /// Size of every default segment (1 MiB).
    pub const REGION_SIZE: u32 = 0x0010_0000;
}

/// Root configuration structure for the simulator.
///
/// # Examples
///
/// ```
/// use mips_pipe_core::config::Config;
///
/// let json = r#"{ "general": { "trace_instructions": true } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.regions.len(), 5);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Memory map.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document.
    ///
    /// # Returns
    ///
    /// The validated configuration, or `SimError::ConfigParse` / `SimError::Config`.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the memory map is usable.
    ///
    /// Regions must be non-empty, fit in the 32-bit address space, and be
    /// pairwise disjoint. The text base must be word aligned and fall inside a region.
    ///
    /// # Returns
    ///
    /// `Ok(())` for a consistent configuration, otherwise `SimError::Config`.
    pub fn validate(&self) -> Result<(), SimError> {
        let regions = &self.memory.regions;
        if regions.is_empty() {
            return Err(SimError::Config("no memory regions configured".into()));
        }

        for region in regions {
            if region.size == 0 {
                return Err(SimError::Config(format!(
                    "region '{}' has zero size",
                    region.name
                )));
            }
            if region.end() > 1u64 << 32 {
                return Err(SimError::Config(format!(
                    "region '{}' extends past the 32-bit address space",
                    region.name
                )));
            }
        }

        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                if u64::from(a.base) < b.end() && u64::from(b.base) < a.end() {
                    return Err(SimError::Config(format!(
                        "regions '{}' and '{}' overlap",
                        a.name, b.name
                    )));
                }
            }
        }

        let text_base = self.general.text_base;
        if text_base % 4 != 0 {
            return Err(SimError::Config(format!(
                "text base {text_base:#010x} is not word aligned"
            )));
        }
        if !regions.iter().any(|r| r.contains(text_base)) {
            return Err(SimError::Config(format!(
                "text base {text_base:#010x} is not inside any region"
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage trace events (`tracing` at TRACE level) for every cycle.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Address where the program image is loaded and execution starts.
    #[serde(default = "GeneralConfig::default_text_base")]
    pub text_base: u32,
}

impl GeneralConfig {
    /// Returns the default text base.
    const fn default_text_base() -> u32 {
        defaults::TEXT_BASE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            text_base: defaults::TEXT_BASE,
        }
    }
}

/// Memory map configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Disjoint memory regions. Accesses outside every region fault.
    #[serde(default = "MemoryConfig::default_regions")]
    pub regions: Vec<RegionConfig>,
}

impl MemoryConfig {
    /// Returns the MU-MIPS memory map.
    fn default_regions() -> Vec<RegionConfig> {
        vec![
            RegionConfig::new("text", defaults::TEXT_BASE, defaults::REGION_SIZE),
            RegionConfig::new("data", defaults::DATA_BASE, defaults::REGION_SIZE),
            RegionConfig::new("stack", defaults::STACK_BASE, defaults::REGION_SIZE),
            RegionConfig::new("ktext", defaults::KTEXT_BASE, defaults::REGION_SIZE),
            RegionConfig::new("kdata", defaults::KDATA_BASE, defaults::REGION_SIZE),
        ]
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            regions: Self::default_regions(),
        }
    }
}

/// One contiguous memory region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionConfig {
    /// Human-readable region name (used in diagnostics).
    pub name: String,
    /// First byte address.
    pub base: u32,
    /// Size in bytes.
    pub size: u32,
}

impl RegionConfig {
    /// Creates a region description.
    pub fn new(name: &str, base: u32, size: u32) -> Self {
        Self {
            name: name.to_string(),
            base,
            size,
        }
    }

    /// Exclusive end address, widened so a region ending at 4 GiB is representable.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + u64::from(self.size)
    }

    /// Returns `true` if `addr` lies inside the region.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.base && u64::from(addr) < self.end()
    }
}
