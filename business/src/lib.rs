pub mod application {
    pub mod notification {
        pub mod channel;
    }
    pub mod product {
        pub mod delete;
        pub mod get_by_id;
    }
    pub mod workflow {
        pub mod confirmation;
        pub mod search;
        pub mod settings;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod notification {
        pub mod model;
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod delete;
            pub mod get_by_id;
        }
    }
    pub mod session {
        pub mod state;
    }
}
