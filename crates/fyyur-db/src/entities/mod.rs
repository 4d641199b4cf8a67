pub mod artist;
pub mod genre_list;
pub mod show;
pub mod venue;

pub use genre_list::GenreList;
