// saves the current pattern as an svg file

use bevy::prelude::*;

use lowpoly_gen::SvgOptions;

use crate::systems::mesh::CurrentPattern;
use crate::systems::ui::StatusEvent;

// export event
#[derive(Event)]
pub struct ExportEvent {
    pub filename: String,
}

// timestamped name in the working directory
pub fn export_filename() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("lowpoly_{timestamp}.svg")
}

// handle export events
pub fn handle_export(
    mut events: EventReader<ExportEvent>,
    current: Res<CurrentPattern>,
    mut status_events: EventWriter<StatusEvent>,
) {
    for event in events.read() {
        let Some(pattern) = &current.pattern else {
            warn!("nothing to export yet");
            continue;
        };

        match pattern.write_svg(&event.filename, &SvgOptions::default()) {
            Ok(()) => {
                info!("exported {} triangles to {}", pattern.polys().len(), event.filename);
                status_events.write(StatusEvent::info(format!("Exported {}", event.filename)));
            }
            Err(e) => {
                error!("export failed: {e}");
                status_events.write(StatusEvent::error(format!("Export failed: {e}")));
            }
        }
    }
}
