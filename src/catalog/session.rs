//! # Scripted viewer session
//!
//! Builds the ordered command sequence that configures and animates the
//! external viewer for one mission: display mode, initial time, trajectory
//! visibility, central and selected object, a fixed camera pose, fade-in, a
//! short wait, playback rate, and unpause. The command spelling follows the
//! viewer's scripting module and is emitted as a small Python driver file.

/// Fixed camera position used by every generated session, kilometers in the
/// center body frame.
const CAMERA_POSITION: [f64; 3] = [0.0, -65000.0, 25000.0];

/// Fixed camera orientation quaternion `[w, x, y, z]`.
const CAMERA_ORIENTATION: [f64; 4] = [0.92388, 0.38268, 0.0, 0.0];

/// Fade-in duration in seconds.
const FADE_IN_SECONDS: u32 = 2;

/// Wait before playback starts, seconds.
const WAIT_SECONDS: u32 = 2;

/// Playback rate once unpaused, simulated seconds per wall second.
const TIME_RATE: u32 = 50;

/// The ordered imperative command list of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionScript {
    lines: Vec<String>,
}

impl SessionScript {
    /// Assemble the session for a mission.
    ///
    /// Arguments
    /// -----------------
    /// * `start_time`: Mission-wide reference instant shown at load.
    /// * `satellite_names`: Display names whose trajectories are shown.
    /// * `center_name`: Resolved center body, becomes the central object.
    ///
    /// Return
    /// ----------
    /// * The script; the first satellite is selected so the viewer camera
    ///   has a focus object.
    pub fn build(start_time: &str, satellite_names: &[String], center_name: &str) -> Self {
        let mut lines = vec![
            "import cosmoscripting".to_string(),
            String::new(),
            "cosmo = cosmoscripting.Cosmo()".to_string(),
            String::new(),
            "cosmo.showFullScreen()".to_string(),
            format!("cosmo.setTime(\"{start_time}\")"),
        ];
        for name in satellite_names {
            lines.push(format!("cosmo.showTrajectory(\"{name}\")"));
        }
        lines.push(format!("cosmo.setCentralObject(\"{center_name}\")"));
        if let Some(first) = satellite_names.first() {
            lines.push(format!("cosmo.selectObject(\"{first}\")"));
        }
        lines.push(format!(
            "cosmo.setCameraPosition([{}, {}, {}])",
            CAMERA_POSITION[0], CAMERA_POSITION[1], CAMERA_POSITION[2]
        ));
        lines.push(format!(
            "cosmo.setCameraOrientation([{}, {}, {}, {}])",
            CAMERA_ORIENTATION[0],
            CAMERA_ORIENTATION[1],
            CAMERA_ORIENTATION[2],
            CAMERA_ORIENTATION[3]
        ));
        lines.push(format!("cosmo.fadeIn({FADE_IN_SECONDS})"));
        lines.push(format!("cosmo.wait({WAIT_SECONDS})"));
        lines.push(format!("cosmo.setTimeRate({TIME_RATE})"));
        lines.push("cosmo.unpause()".to_string());
        SessionScript { lines }
    }

    /// Render the script as the on-disk document.
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod session_test {
    use super::*;

    #[test]
    fn test_command_ordering() {
        let script = SessionScript::build(
            "2026-03-01 00:00:00.000 UTC",
            &["sat-A".to_string(), "sat-B".to_string()],
            "Earth",
        );
        let text = script.render();
        let time_pos = text.find("setTime").unwrap();
        let show_pos = text.find("showTrajectory(\"sat-A\")").unwrap();
        let central_pos = text.find("setCentralObject(\"Earth\")").unwrap();
        let rate_pos = text.find("setTimeRate").unwrap();
        let unpause_pos = text.find("unpause").unwrap();
        assert!(time_pos < show_pos);
        assert!(show_pos < central_pos);
        assert!(central_pos < rate_pos);
        assert!(rate_pos < unpause_pos);
        assert!(text.contains("showTrajectory(\"sat-B\")"));
        assert!(text.contains("selectObject(\"sat-A\")"));
    }

    #[test]
    fn test_determinism() {
        let names = vec!["a".to_string()];
        let one = SessionScript::build("t", &names, "Earth").render();
        let two = SessionScript::build("t", &names, "Earth").render();
        assert_eq!(one, two);
    }
}
