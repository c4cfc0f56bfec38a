mod gga;
mod gll;
mod grs;
mod gsa;
mod gst;
mod gsv;
mod rmc;
mod vtg;
mod zda;

pub use gga::*;
pub use gll::*;
pub use grs::*;
pub use gsa::*;
pub use gst::*;
pub use gsv::*;
pub use rmc::*;
pub use vtg::*;
pub use zda::*;

pub(crate) use gga::gga;
pub(crate) use gll::gll;
pub(crate) use grs::grs;
pub(crate) use gsa::gsa;
pub(crate) use gst::gst;
pub(crate) use gsv::gsv;
pub(crate) use rmc::rmc;
pub(crate) use vtg::vtg;
pub(crate) use zda::zda;
