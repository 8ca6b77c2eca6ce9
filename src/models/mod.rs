mod category;
mod note;

pub use category::Category;
pub use note::{NewNote, Note, NotePatch};
