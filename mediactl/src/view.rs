//! Volume presentation seam
//!
//! The orchestrator reports every accepted master volume to a [`VolumeView`]:
//! a text label for display and, for programmatic changes, the position the
//! input control should move to.

use tracing::info;

/// Label text shown for a master volume
pub fn volume_label(volume: i32) -> String {
    if volume == 0 {
        "(muted)".to_string()
    } else {
        format!("Volume: {}%", volume)
    }
}

/// Display and input control collaborator
pub trait VolumeView: Send + Sync {
    fn render_label(&self, label: &str);

    fn move_slider(&self, volume: i32);
}

/// View that writes to the log; used when running headless
#[derive(Debug, Default)]
pub struct LogView;

impl VolumeView for LogView {
    fn render_label(&self, label: &str) {
        info!("{}", label);
    }

    fn move_slider(&self, volume: i32) {
        info!("Volume control moved to {}", volume);
    }
}
