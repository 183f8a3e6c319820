pub mod template_resolvers;
