pub mod db;
pub mod product {
    pub mod entity;
    pub mod repository;
}
pub mod price_record {
    pub mod entity;
    pub mod repository;
}
