pub mod turbojpeg;
pub mod turbojpeg_sys;
