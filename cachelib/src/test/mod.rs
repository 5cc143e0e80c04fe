mod hierarchy;
mod trace;
