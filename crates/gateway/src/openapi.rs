use utoipa::OpenApi;

use common::types::{CategoryDto, ErrorBody, InventoryDto, ProductDetails, ProductDto};

use crate::routes::{categories, inventory, products};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        categories::list,
        categories::get_one,
        categories::get_by_name,
        categories::search,
        categories::create,
        categories::update,
        categories::remove,
        products::list,
        products::get_one,
        products::details,
        products::search,
        products::by_category,
        products::by_category_name,
        products::by_max_price,
        products::by_min_price,
        products::by_price_range,
        products::create,
        products::update,
        products::assign_category,
        products::remove_category,
        products::remove,
        inventory::list,
        inventory::get_one,
        inventory::by_product,
        inventory::by_product_name,
        inventory::by_location,
        inventory::quantity_less,
        inventory::quantity_greater,
        inventory::quantity_range,
        inventory::by_category,
        inventory::out_of_stock,
        inventory::create,
        inventory::update,
        inventory::set_quantity,
        inventory::remove,
    ),
    components(schemas(CategoryDto, ProductDto, InventoryDto, ProductDetails, ErrorBody)),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "products"),
        (name = "inventory")
    )
)]
pub struct ApiDoc;
