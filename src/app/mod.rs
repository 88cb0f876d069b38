pub mod countdown_app;

pub use countdown_app::CountdownApp;
