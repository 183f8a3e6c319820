pub mod basic_vite_resolver;
