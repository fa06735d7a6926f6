mod actions;
mod scripts;
mod state;
mod view;

pub use view::ChatView;
