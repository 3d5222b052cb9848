//! The categorical-to-integer encoding table.
//!
//! This is the one place where option labels are tied to integer codes and where
//! the column order of the feature vector is fixed. Offline retraining tooling
//! consumes the same table through [`EncodingTable::current`] so that training and
//! inference can never disagree on an encoding. Any change to a code or to the
//! column order must bump [`ENCODING_VERSION`]; artifacts record the version they
//! were fit against and are rejected on mismatch.

use serde::Serialize;

use crate::error::EncodingError;

/// Version of the encoding scheme below.
pub const ENCODING_VERSION: u32 = 1;

/// Number of columns in a feature vector.
pub const FEATURE_COUNT: usize = 10;

/// Column names in vector order, spelled as in the training data set.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "ever_married",
    "work_type",
    "Residence_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
];

/// Feature vector columns, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    EverMarried,
    WorkType,
    ResidenceType,
    AvgGlucoseLevel,
    Bmi,
    SmokingStatus,
}

impl Column {
    pub const ALL: [Column; FEATURE_COUNT] = [
        Column::Gender,
        Column::Age,
        Column::Hypertension,
        Column::HeartDisease,
        Column::EverMarried,
        Column::WorkType,
        Column::ResidenceType,
        Column::AvgGlucoseLevel,
        Column::Bmi,
        Column::SmokingStatus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Attribute name used in error messages.
            pub const FIELD: &'static str = $field;
            /// Every member of the domain, in code order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
            /// Option labels, in code order.
            pub const LABELS: &'static [&'static str] = &[ $( $label ),+ ];

            pub fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look up a domain member by its exact option label.
            pub fn from_label(label: &str) -> Result<Self, EncodingError> {
                match label {
                    $( $label => Ok($name::$variant), )+
                    other => Err(EncodingError::UnknownCategory {
                        field: Self::FIELD,
                        value: other.to_string(),
                        expected: Self::LABELS,
                    }),
                }
            }

            fn categories() -> Vec<CategoryCode> {
                Self::ALL
                    .iter()
                    .map(|v| CategoryCode {
                        label: v.label(),
                        code: v.code(),
                    })
                    .collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = EncodingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical! {
    /// Patient gender.
    Gender, field = "gender" {
        Female = 0 => "Female",
        Male = 1 => "Male",
        Other = 2 => "Other",
    }
}

categorical! {
    /// Employment category.
    WorkType, field = "work_type" {
        Children = 0 => "children",
        GovtJob = 1 => "Govt_job",
        NeverWorked = 2 => "Never_worked",
        Private = 3 => "Private",
        SelfEmployed = 4 => "Self-employed",
    }
}

categorical! {
    ResidenceType, field = "residence_type" {
        Rural = 0 => "Rural",
        Urban = 1 => "Urban",
    }
}

categorical! {
    /// Smoking history. `Unknown` is a real category in the training data, not a
    /// missing value.
    SmokingStatus, field = "smoking_status" {
        FormerlySmoked = 0 => "formerly smoked",
        NeverSmoked = 1 => "never smoked",
        Smokes = 2 => "smokes",
        Unknown = 3 => "Unknown",
    }
}

/// Code for a yes/no attribute.
pub fn flag_code(value: bool) -> u8 {
    u8::from(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCode {
    pub label: &'static str,
    pub code: u8,
}

/// How one column's value is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnEncoding {
    /// Number passed through unchanged.
    Numeric,
    /// No/false → 0, Yes/true → 1.
    Binary { no: u8, yes: u8 },
    Categorical { categories: Vec<CategoryCode> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub index: usize,
    pub name: &'static str,
    #[serde(flatten)]
    pub encoding: ColumnEncoding,
}

/// Serializable description of the whole encoding scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingTable {
    pub version: u32,
    pub columns: Vec<ColumnSpec>,
}

impl EncodingTable {
    /// The table the encoder applies.
    pub fn current() -> Self {
        let columns = Column::ALL
            .iter()
            .map(|&column| ColumnSpec {
                index: column.index(),
                name: column.name(),
                encoding: column_encoding(column),
            })
            .collect();
        Self {
            version: ENCODING_VERSION,
            columns,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn column_encoding(column: Column) -> ColumnEncoding {
    match column {
        Column::Gender => ColumnEncoding::Categorical {
            categories: Gender::categories(),
        },
        Column::WorkType => ColumnEncoding::Categorical {
            categories: WorkType::categories(),
        },
        Column::ResidenceType => ColumnEncoding::Categorical {
            categories: ResidenceType::categories(),
        },
        Column::SmokingStatus => ColumnEncoding::Categorical {
            categories: SmokingStatus::categories(),
        },
        Column::Hypertension | Column::HeartDisease | Column::EverMarried => {
            ColumnEncoding::Binary {
                no: flag_code(false),
                yes: flag_code(true),
            }
        }
        Column::Age | Column::AvgGlucoseLevel | Column::Bmi => ColumnEncoding::Numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_follow_training_mapping() {
        assert_eq!(Gender::Female.code(), 0);
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(Gender::Other.code(), 2);

        assert_eq!(WorkType::Children.code(), 0);
        assert_eq!(WorkType::GovtJob.code(), 1);
        assert_eq!(WorkType::NeverWorked.code(), 2);
        assert_eq!(WorkType::Private.code(), 3);
        assert_eq!(WorkType::SelfEmployed.code(), 4);

        assert_eq!(SmokingStatus::FormerlySmoked.code(), 0);
        assert_eq!(SmokingStatus::NeverSmoked.code(), 1);
        assert_eq!(SmokingStatus::Smokes.code(), 2);
        assert_eq!(SmokingStatus::Unknown.code(), 3);

        assert_eq!(ResidenceType::Rural.code(), 0);
        assert_eq!(ResidenceType::Urban.code(), 1);
    }

    #[test]
    fn labels_are_listed_in_code_order() {
        for (i, v) in WorkType::ALL.iter().enumerate() {
            assert_eq!(usize::from(v.code()), i);
            assert_eq!(WorkType::LABELS[i], v.label());
        }
        for (i, v) in SmokingStatus::ALL.iter().enumerate() {
            assert_eq!(usize::from(v.code()), i);
        }
    }

    #[test]
    fn from_label_is_exact() {
        assert_eq!("Self-employed".parse::<WorkType>(), Ok(WorkType::SelfEmployed));
        assert!(matches!(
            "self-employed".parse::<WorkType>(),
            Err(EncodingError::UnknownCategory {
                field: "work_type",
                ..
            })
        ));
        assert!(Gender::from_label(" Male").is_err());
    }

    #[test]
    fn column_order_is_fixed() {
        let names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
        assert_eq!(Column::SmokingStatus.index(), FEATURE_COUNT - 1);
    }

    #[test]
    fn table_exports_every_column() {
        let table = EncodingTable::current();
        assert_eq!(table.version, ENCODING_VERSION);
        assert_eq!(table.columns.len(), FEATURE_COUNT);

        let json: serde_json::Value =
            serde_json::from_str(&table.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["columns"][0]["name"], "gender");
        assert_eq!(json["columns"][0]["kind"], "categorical");
        assert_eq!(json["columns"][1]["kind"], "numeric");
        assert_eq!(json["columns"][2]["kind"], "binary");
        assert_eq!(json["columns"][9]["categories"][3]["label"], "Unknown");
        assert_eq!(json["columns"][9]["categories"][3]["code"], 3);
    }
}
