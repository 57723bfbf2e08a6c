mod error;
pub use error::{ModelError, ModelResult};

mod graph;
pub use graph::{
    DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH, MAX_GRAPH_HEIGHT, MAX_GRAPH_WIDTH,
    PROP_GRAPH_HEIGHT, PROP_GRAPH_WIDTH, clamp_height, clamp_width,
};

mod ident;
pub use ident::Ident;

mod menu;
pub use menu::{DEFAULT_MENU_TABLE, MenuEntry, default_menu, parse_menu_table, sort_menu};

mod token;
pub use token::TokenPair;
