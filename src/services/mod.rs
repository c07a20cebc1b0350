pub mod osrm;
pub mod polyline;
pub mod route_suggester;
pub mod street_conformer;
pub mod track_import;
