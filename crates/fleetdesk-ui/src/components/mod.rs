pub mod banner;
pub mod confirm;
pub mod field;
pub mod modal;
pub mod nav;
pub mod pager;
pub mod ratio_ring;
pub mod stat_card;
pub mod status_dot;
pub mod toast;
