//! Home geofence editing.
//!
//! The rendered circle comes from exactly one source: the server-owned
//! [`HomeLocation`] while viewing, or the client-owned [`EditBuffer`] while
//! editing.

use crate::location::{Coordinate, HomeLocation};

pub const DEFAULT_MAX_RADIUS_M: f64 = 500.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EditBuffer {
    pub center: Coordinate,
    pub radius: f64,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Mode {
    #[default]
    View,
    Edit(EditBuffer),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeofenceCircle {
    pub center: Coordinate,
    pub radius: f64,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceEditor {
    mode: Mode,
    max_radius: f64,
}

impl Default for GeofenceEditor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RADIUS_M)
    }
}

impl GeofenceEditor {
    pub fn new(max_radius: f64) -> Self {
        Self {
            mode: Mode::View,
            max_radius,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        match &self.mode {
            Mode::Edit(buffer) => Some(buffer),
            Mode::View => None,
        }
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn clamp_radius(&self, radius: f64) -> f64 {
        radius.min(self.max_radius)
    }

    /// Enter edit mode with a buffer seeded from `home`. Returns false if
    /// already editing.
    pub fn edit(&mut self, home: &HomeLocation) -> bool {
        if self.is_editing() {
            return false;
        }

        self.mode = Mode::Edit(EditBuffer {
            center: home.center(),
            radius: self.clamp_radius(home.radius),
        });
        true
    }

    pub fn set_center(&mut self, center: Coordinate) {
        if let Mode::Edit(ref mut buffer) = self.mode {
            buffer.center = center;
        }
    }

    pub fn set_radius(&mut self, radius: f64) {
        let radius = self.clamp_radius(radius);
        if let Mode::Edit(ref mut buffer) = self.mode {
            buffer.radius = radius;
        }
    }

    /// Leave edit mode, handing back the buffer to be persisted
    pub fn save(&mut self) -> Option<EditBuffer> {
        match std::mem::take(&mut self.mode) {
            Mode::Edit(buffer) => Some(buffer),
            Mode::View => None,
        }
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::View;
    }

    pub fn circle(&self, home: &HomeLocation) -> GeofenceCircle {
        match &self.mode {
            Mode::Edit(buffer) => GeofenceCircle {
                center: buffer.center,
                radius: buffer.radius,
                editable: true,
            },
            Mode::View => GeofenceCircle {
                center: home.center(),
                radius: self.clamp_radius(home.radius),
                editable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> HomeLocation {
        HomeLocation {
            latitude: -6.2,
            longitude: 106.8,
            radius: 400.0,
            ..HomeLocation::default()
        }
    }

    #[test]
    fn radius_is_clamped() {
        let mut editor = GeofenceEditor::default();
        editor.edit(&home());
        for (submitted, stored) in [(10.0, 10.0), (499.9, 499.9), (500.0, 500.0), (750.0, 500.0)] {
            editor.set_radius(submitted);
            assert_eq!(editor.buffer().unwrap().radius, stored);
        }
    }

    #[test]
    fn callbacks_are_ignored_while_viewing() {
        let mut editor = GeofenceEditor::default();
        editor.set_center(Coordinate::new(1.0, 1.0));
        editor.set_radius(100.0);
        assert_eq!(editor.mode(), &Mode::View);
        assert_eq!(editor.circle(&home()).center, Coordinate::new(-6.2, 106.8));
        assert_eq!(editor.circle(&home()).radius, 400.0);
    }

    #[test]
    fn edit_save_cycle() {
        let mut editor = GeofenceEditor::default();
        assert!(editor.save().is_none());

        assert!(editor.edit(&home()));
        assert!(!editor.edit(&home()));
        editor.set_center(Coordinate::new(-6.21, 106.81));
        editor.set_radius(250.0);

        let circle = editor.circle(&home());
        assert!(circle.editable);
        assert_eq!(circle.center, Coordinate::new(-6.21, 106.81));

        let saved = editor.save().unwrap();
        assert_eq!(saved.radius, 250.0);
        assert!(!editor.is_editing());
        assert!(editor.buffer().is_none());
    }

    #[test]
    fn cancel_discards_buffer() {
        let mut editor = GeofenceEditor::default();
        editor.edit(&home());
        editor.set_radius(50.0);
        editor.cancel();
        assert!(editor.buffer().is_none());
        assert_eq!(editor.circle(&home()).radius, 400.0);
    }

    #[test]
    fn configurable_maximum() {
        let mut editor = GeofenceEditor::new(300.0);
        editor.edit(&home());
        assert_eq!(editor.buffer().unwrap().radius, 300.0);
    }
}
