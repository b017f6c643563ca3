//! Domain layer: setting keys and the values stored under them.
//!
//! - **`key`** – [`key::SettingKey`], the mandatory bootstrap order, and the
//!   boolean string encoding.
//!
//! - **`driver`** – [`driver::DriverType`] (the `Driver type` channel tags)
//!   and the GPU list payload used when provisioning `GPU ID`.

pub mod driver;
pub mod key;
