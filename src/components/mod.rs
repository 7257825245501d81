pub mod force_graph;
pub mod graph_overlay;
pub mod result_card;
