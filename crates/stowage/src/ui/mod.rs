mod tracker;

pub use tracker::BarObserver;
