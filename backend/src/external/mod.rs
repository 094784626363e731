//! External API integrations

pub mod open_meteo;
pub mod osrm;

pub use open_meteo::{OpenMeteoClient, DEFAULT_OPEN_METEO_ENDPOINT};
pub use osrm::{OsrmClient, DEFAULT_OSRM_ENDPOINT};
