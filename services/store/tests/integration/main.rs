mod helpers;

mod category_test;
mod order_test;
mod post_test;
mod product_test;
mod router_test;
