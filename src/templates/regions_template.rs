use askama::Template;

pub struct RegionFactorView {
    pub name: &'static str,
    pub flag_label: &'static str,
    pub region_code: &'static str,
    pub factor: String,
}

#[derive(Template)]
#[template(path = "regions.html")]
pub struct RegionsPageTemplate {
    pub dark_theme: bool,
    pub api_hostname: String,
    pub version: &'static str,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub regions: Vec<RegionFactorView>,
    pub default_factor: String,
}

crate::impl_base_template!(RegionsPageTemplate);
