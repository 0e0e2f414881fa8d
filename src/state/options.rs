use clap::ValueEnum;
use crate::models::location::LatLng;
use crate::models::search::Radius;

/// Union Square, San Francisco.
pub const DEFAULT_CENTER: LatLng = LatLng::new(37.7879, -122.4095);
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Panel chrome around the list and map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Layout {
    /// Header and filters can be hidden and brought back.
    #[default]
    Collapsible,
    /// Header and filters are always shown.
    Fixed,
}

/// Start-up values for a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageOptions {
    pub default_center: LatLng,
    pub default_radius: Radius,
    pub default_zoom: f64,
    pub layout: Layout,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_radius: Radius::DEFAULT,
            default_zoom: DEFAULT_ZOOM,
            layout: Layout::Collapsible,
        }
    }
}
