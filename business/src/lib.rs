pub mod application {
    pub mod scan {
        pub mod process_scan;
        pub mod reconcile;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod product {
        pub mod model;
        pub mod repository;
    }
    pub mod price_record {
        pub mod model;
        pub mod repository;
    }
    pub mod scan {
        pub mod catalog;
        pub mod errors;
        pub mod extractor;
        pub mod model;
        pub mod recognizer;
        pub mod resolver;
        pub mod services;
        pub mod validator;
        pub mod use_cases {
            pub mod process_scan;
            pub mod reconcile;
        }
    }
}
