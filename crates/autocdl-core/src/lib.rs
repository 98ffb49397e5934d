pub mod cdl;
pub mod consts;
pub mod detection;
pub mod error;
pub mod exposure;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod request;
pub mod scene;
pub mod stats;
pub mod verify;
