//! Static category metadata.
//!
//! Drives two things: the create-product form (field lists per category)
//! and the faceted category browse (primary options + sub-options). The
//! registry is code, not database content; it changes with releases.

use std::sync::OnceLock;

use serde::Serialize;

/// Top-level product categories.
pub const PRODUCT_CATEGORIES: [&str; 5] =
    ["Books", "Electronics", "Clothing", "Vehicles", "Accessories"];

/// Field labels eligible as a category's primary facet.
const PRIMARY_FACET_LABELS: [&str; 3] = ["genre", "subCategory", "brand"];

/// Field labels eligible as facet sub-options.
const SUB_FACET_LABELS: [&str; 5] =
    ["type", "subCategory", "color", "storageCapacity", "cellularTech"];

/// Indian states and union territories `(name, code)`, for the address
/// form and PIN/state validation.
pub const STATES_INFO: [(&str, &str); 36] = [
    ("Andhra Pradesh", "AP"),
    ("Arunachal Pradesh", "AR"),
    ("Assam", "AS"),
    ("Bihar", "BR"),
    ("Chhattisgarh", "CG"),
    ("Goa", "GA"),
    ("Gujarat", "GJ"),
    ("Haryana", "HR"),
    ("Himachal Pradesh", "HP"),
    ("Jammu and Kashmir", "JK"),
    ("Jharkhand", "JH"),
    ("Karnataka", "KA"),
    ("Kerala", "KL"),
    ("Madhya Pradesh", "MP"),
    ("Maharashtra", "MH"),
    ("Manipur", "MN"),
    ("Meghalaya", "ML"),
    ("Mizoram", "MZ"),
    ("Nagaland", "NL"),
    ("Odisha", "OD"),
    ("Punjab", "PB"),
    ("Rajasthan", "RJ"),
    ("Sikkim", "SK"),
    ("Tamil Nadu", "TN"),
    ("Telangana", "TS"),
    ("Tripura", "TR"),
    ("Uttarakhand", "UK"),
    ("Uttar Pradesh", "UP"),
    ("West Bengal", "WB"),
    ("Andaman and Nicobar Islands", "AN"),
    ("Chandigarh", "CH"),
    ("Dadra and Nagar Haveli", "DN"),
    ("Daman and Diu", "DD"),
    ("Delhi", "DL"),
    ("Lakshadweep", "LD"),
    ("Puducherry", "PY"),
];

/// One form field of a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub label: &'static str,
    pub field_name: &'static str,
    #[serde(rename = "type")]
    pub input: &'static str,
    pub required: bool,
    pub multiple: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    /// Nested fields refining one of `options`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<OptionFields>,
}

impl FieldSpec {
    fn select(label: &'static str, field_name: &'static str, options: &[&'static str]) -> Self {
        Self {
            label,
            field_name,
            input: "select",
            required: true,
            multiple: false,
            options: options.to_vec(),
            metadata: Vec::new(),
        }
    }

    fn with_metadata(mut self, metadata: Vec<OptionFields>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Fields applying to one option value of the parent field.
#[derive(Debug, Clone, Serialize)]
pub struct OptionFields {
    pub category: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// A category with its form fields.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpec {
    pub category: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Facet view of one category: primary options plus sub-options.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFacet {
    pub category: &'static str,
    pub options: Vec<&'static str>,
    pub sub_options: Vec<SubOption>,
}

/// One sub-option group of a facet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubOption {
    pub category: &'static str,
    pub field: &'static str,
    pub options: Vec<&'static str>,
}

fn option_fields(category: &'static str, fields: Vec<FieldSpec>) -> OptionFields {
    OptionFields { category, fields }
}

/// The full category registry.
pub fn category_specs() -> &'static [CategorySpec] {
    static SPECS: OnceLock<Vec<CategorySpec>> = OnceLock::new();
    SPECS.get_or_init(build_specs)
}

fn build_specs() -> Vec<CategorySpec> {
    vec![
        CategorySpec {
            category: "Books",
            fields: vec![FieldSpec::select(
                "genre",
                "Genre",
                &["Fiction", "Nonfiction", "Academic", "Comics", "Children"],
            )
            .with_metadata(vec![
                option_fields(
                    "Fiction",
                    vec![FieldSpec::select(
                        "type",
                        "Type",
                        &["Novel", "Short Stories", "Poetry"],
                    )],
                ),
                option_fields(
                    "Academic",
                    vec![FieldSpec::select(
                        "type",
                        "Type",
                        &["Engineering", "Medicine", "Law", "Management"],
                    )],
                ),
            ])],
        },
        CategorySpec {
            category: "Electronics",
            fields: vec![FieldSpec::select(
                "subCategory",
                "Sub Category",
                &["Mobiles", "Laptops", "Televisions", "Cameras", "Audio"],
            )
            .with_metadata(vec![
                option_fields(
                    "Mobiles",
                    vec![
                        FieldSpec::select(
                            "brand",
                            "Brand",
                            &["Apple", "Samsung", "OnePlus", "Xiaomi", "Realme"],
                        ),
                        FieldSpec::select(
                            "storageCapacity",
                            "Storage Capacity",
                            &["64 GB", "128 GB", "256 GB", "512 GB"],
                        ),
                        FieldSpec::select("cellularTech", "Cellular Technology", &["4G", "5G"]),
                        FieldSpec::select("color", "Color", &["Black", "White", "Blue", "Silver"]),
                    ],
                ),
                option_fields(
                    "Laptops",
                    vec![
                        FieldSpec::select(
                            "brand",
                            "Brand",
                            &["Apple", "Dell", "HP", "Lenovo", "Asus"],
                        ),
                        FieldSpec::select(
                            "storageCapacity",
                            "Storage Capacity",
                            &["256 GB", "512 GB", "1 TB"],
                        ),
                        FieldSpec::select("color", "Color", &["Black", "Silver", "Grey"]),
                    ],
                ),
                option_fields(
                    "Televisions",
                    vec![FieldSpec::select(
                        "brand",
                        "Brand",
                        &["Sony", "Samsung", "LG", "Mi"],
                    )],
                ),
            ])],
        },
        CategorySpec {
            category: "Clothing",
            fields: vec![FieldSpec::select(
                "subCategory",
                "Sub Category",
                &["Men", "Women", "Kids"],
            )
            .with_metadata(vec![
                option_fields(
                    "Men",
                    vec![
                        FieldSpec::select(
                            "type",
                            "Type",
                            &["Shirts", "T-Shirts", "Trousers", "Ethnic Wear"],
                        ),
                        FieldSpec::select("color", "Color", &["Black", "White", "Blue", "Red"]),
                    ],
                ),
                option_fields(
                    "Women",
                    vec![
                        FieldSpec::select(
                            "type",
                            "Type",
                            &["Sarees", "Kurtas", "Dresses", "Tops"],
                        ),
                        FieldSpec::select("color", "Color", &["Black", "White", "Blue", "Red"]),
                    ],
                ),
                option_fields(
                    "Kids",
                    vec![FieldSpec::select("type", "Type", &["T-Shirts", "Frocks", "Shorts"])],
                ),
            ])],
        },
        CategorySpec {
            category: "Vehicles",
            fields: vec![FieldSpec::select(
                "subCategory",
                "Sub Category",
                &["Cars", "Motorcycles", "Scooters", "Bicycles"],
            )
            .with_metadata(vec![
                option_fields(
                    "Cars",
                    vec![
                        FieldSpec::select(
                            "brand",
                            "Brand",
                            &["Maruti Suzuki", "Hyundai", "Tata", "Mahindra", "Honda"],
                        ),
                        FieldSpec::select("type", "Type", &["Hatchback", "Sedan", "SUV"]),
                    ],
                ),
                option_fields(
                    "Motorcycles",
                    vec![FieldSpec::select(
                        "brand",
                        "Brand",
                        &["Hero", "Bajaj", "Royal Enfield", "TVS", "Yamaha"],
                    )],
                ),
            ])],
        },
        CategorySpec {
            category: "Accessories",
            fields: vec![FieldSpec::select(
                "subCategory",
                "Sub Category",
                &["Watches", "Bags", "Footwear", "Jewellery"],
            )
            .with_metadata(vec![
                option_fields(
                    "Watches",
                    vec![
                        FieldSpec::select(
                            "brand",
                            "Brand",
                            &["Titan", "Fastrack", "Casio", "Fossil"],
                        ),
                        FieldSpec::select("type", "Type", &["Analog", "Digital", "Smart"]),
                    ],
                ),
                option_fields(
                    "Footwear",
                    vec![FieldSpec::select(
                        "type",
                        "Type",
                        &["Sneakers", "Sandals", "Formal"],
                    )],
                ),
            ])],
        },
    ]
}

/// Project the registry into its facet view: per category, the options of
/// the designated primary field and the sub-options of the eligible
/// nested fields.
pub fn category_facets() -> Vec<CategoryFacet> {
    category_specs()
        .iter()
        .map(|spec| {
            let primary = spec
                .fields
                .iter()
                .find(|f| PRIMARY_FACET_LABELS.contains(&f.label));

            let (options, sub_options) = match primary {
                Some(field) => {
                    let subs = field
                        .metadata
                        .iter()
                        .flat_map(|meta| {
                            meta.fields
                                .iter()
                                .filter(|f| SUB_FACET_LABELS.contains(&f.label))
                                .map(|f| SubOption {
                                    category: meta.category,
                                    field: f.field_name,
                                    options: f.options.clone(),
                                })
                        })
                        .collect();
                    (field.options.clone(), subs)
                }
                None => (Vec::new(), Vec::new()),
            };

            CategoryFacet {
                category: spec.category,
                options,
                sub_options,
            }
        })
        .collect()
}

/// The create-product form description: common fields, with the category
/// select carrying the full per-category registry.
pub fn create_product_fields() -> serde_json::Value {
    serde_json::json!([
        {
            "label": "name",
            "fieldName": "Product Name",
            "type": "text",
            "required": true,
            "multiple": false,
        },
        {
            "label": "category",
            "fieldName": "Category",
            "type": "select",
            "required": true,
            "multiple": false,
            "options": PRODUCT_CATEGORIES,
            "metadata": category_specs(),
        },
        {
            "label": "price",
            "fieldName": "Price",
            "type": "number",
            "required": true,
            "multiple": false,
        },
        {
            "label": "description",
            "fieldName": "Description",
            "type": "textarea",
            "required": true,
            "multiple": false,
        },
        {
            "label": "state",
            "fieldName": "State",
            "type": "autocomplete",
            "required": true,
            "multiple": false,
            "options": STATES_INFO.as_slice(),
        },
        {
            "label": "pincode",
            "fieldName": "PIN",
            "type": "number",
            "required": true,
            "multiple": false,
        },
        {
            "label": "note",
            "fieldName": "Note",
            "type": "textarea",
            "required": false,
            "multiple": false,
        },
        {
            "label": "images",
            "fieldName": "Images",
            "type": "file",
            "required": true,
            "multiple": true,
        },
        {
            "label": "hashtags",
            "fieldName": "Hash Tags",
            "type": "hashtag",
            "required": false,
            "multiple": false,
        },
    ])
}
