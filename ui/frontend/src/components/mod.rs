pub mod fall_alert;
pub mod geofence_controls;
pub mod home_info;
pub mod map;
pub mod person_card;
pub mod snackbar;
pub mod sos_locations;
