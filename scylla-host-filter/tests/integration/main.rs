mod admission;
mod allow_list;
mod custom_filter;
