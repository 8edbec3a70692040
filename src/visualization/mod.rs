mod tables;
mod charts;

pub use tables::{
    format_summary_metrics, print_summary_metrics,
    format_group_table, print_group_table,
    format_top_neighborhoods, print_top_neighborhoods,
    format_most_reviewed, print_most_reviewed,
    format_price_statistics, print_price_statistics,
    format_dataset_overview, print_dataset_overview,
    format_filter_options, print_filter_options,
};
pub use charts::{
    format_room_type_chart, print_room_type_chart,
    format_listing_map, print_listing_map,
    format_map_insights, plot_grid, MAP_HEIGHT, MAP_WIDTH,
    format_review_scatter, print_review_scatter, scatter_grid, SCATTER_HEIGHT, SCATTER_WIDTH,
};
