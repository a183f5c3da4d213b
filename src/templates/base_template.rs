/// Base template trait providing the properties every page layout reads.
pub trait BaseTemplate {
    fn dark_theme(&self) -> bool;
    fn api_hostname(&self) -> &str;
    fn version(&self) -> &str;
    fn flash_messages(&self) -> &Vec<String>;
    fn has_flash_messages(&self) -> bool;
}

/// Macro to implement BaseTemplate for a struct with standard fields
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn dark_theme(&self) -> bool {
                self.dark_theme
            }
            fn api_hostname(&self) -> &str {
                &self.api_hostname
            }
            fn version(&self) -> &str {
                self.version
            }
            fn flash_messages(&self) -> &Vec<String> {
                &self.flash_messages
            }
            fn has_flash_messages(&self) -> bool {
                self.has_flash_messages
            }
        }
    };
}
