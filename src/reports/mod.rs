mod format;
mod tables;

pub use self::tables::{
    clusters as print_clusters, keywords as print_keyword_table, overview as print_overview,
    statistics as print_statistics, suggestions as print_suggestions,
};
