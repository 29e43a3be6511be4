//! Vendor identity presets for the vid/pid pair.

/// A named vid/pid combination an operator can select instead of typing
/// identifiers by hand. `ids == None` marks the free-form "custom" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorPreset {
    pub name: &'static str,
    pub ids: Option<(&'static str, &'static str)>,
}

/// Known presets. "custom" must stay first so pickers default to it.
pub const VENDOR_PRESETS: &[VendorPreset] = &[
    VendorPreset {
        name: "custom",
        ids: None,
    },
    VendorPreset {
        name: "pico-fido",
        ids: Some(("1209", "0001")),
    },
    VendorPreset {
        name: "keyforge",
        ids: Some(("2e8a", "f1d0")),
    },
];

/// Look up a preset by its exact name.
pub fn find_preset(name: &str) -> Option<&'static VendorPreset> {
    VENDOR_PRESETS.iter().find(|preset| preset.name == name)
}
