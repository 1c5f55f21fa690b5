pub(crate) mod planner;
