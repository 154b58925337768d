//! Day timeline evaluation: clock times, lunch deferral, and return leg.

mod timeline;

pub use timeline::{
    apply_lunch_rule, clock_time, recompute_day_times, DAY_START_MINUTES, LUNCH_END_MINUTES,
    LUNCH_START_MINUTES, MINUTES_PER_DAY,
};
