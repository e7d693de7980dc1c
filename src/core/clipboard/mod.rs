pub mod monitor;

pub use monitor::ClipboardMonitor;
