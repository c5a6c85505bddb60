pub mod configuration;

pub mod codec {
    pub mod codec;
    pub mod compactcodec;
    pub mod descriptivecodec;
    pub mod textcodec;
}

pub mod math {
    pub mod function {
        pub mod function;
        pub mod analytic {
            pub mod exp;
            pub mod log;
            pub mod trigonometric;
        }
        pub mod combinator {
            pub mod sum;
            pub mod product;
            pub mod power;
            pub mod composition;
        }
    }
}

pub mod tabulated {
    pub mod point;
    pub mod tabulatedfunctionerror;
    pub mod pointstore;
    pub mod arraypointstore;
    pub mod linkedpointstore;
    pub mod tabulatedfunction;
    pub mod tabulator;
}
