use thiserror::Error;

/// Errors raised when declaring a feature schema
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate column in schema: {0}")]
    DuplicateColumn(String),

    #[error("categorical column {0} declared with an empty value domain")]
    EmptyDomain(String),
}

/// Fixed translation table between form tokens (pt-BR) and the value domain
/// the artifact was trained on.
///
/// The table contents are part of the shipped schema version and are pinned
/// by tests; lookups on unknown tokens fail at the call site rather than
/// falling back to a default.
#[derive(Debug, Clone, Copy)]
pub struct ValueMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ValueMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve a form token to the model token.
    pub fn to_model(&self, raw: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(form, _)| *form == raw)
            .map(|(_, model)| *model)
    }

    /// Reverse lookup, for rendering model tokens back in the form locale.
    pub fn to_form(&self, model: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, m)| *m == model)
            .map(|(form, _)| *form)
    }

    /// Form tokens in declaration order, for building choice menus.
    pub fn form_tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(form, _)| *form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Gender selection. Form shows pt-BR; the artifact was trained on English
/// tokens. Earlier revisions of this mapping disagreed on direction; this is
/// the corrected version and tests pin its literal contents.
pub const GENDER_MAP: ValueMap = ValueMap::new(&[
    ("Masculino", "Male"),
    ("Feminino", "Female"),
]);

/// Binary yes/no selections (family history, smoking, calorie monitoring,
/// high-caloric food).
pub const YES_NO_MAP: ValueMap = ValueMap::new(&[
    ("Sim", "yes"),
    ("Não", "no"),
]);

/// Four-valued consumption frequency (between-meal eating, alcohol).
pub const FREQUENCY_MAP: ValueMap = ValueMap::new(&[
    ("Às vezes", "Sometimes"),
    ("Frequentemente", "Frequently"),
    ("Sempre", "Always"),
    ("Não", "no"),
]);

/// Primary transport mode.
pub const TRANSPORT_MAP: ValueMap = ValueMap::new(&[
    ("Transporte Público", "Public_Transportation"),
    ("Caminhada", "Walking"),
    ("Carro", "Automobile"),
    ("Moto", "Motorbike"),
    ("Bicicleta", "Bike"),
]);

/// Whether a feature value is drawn from a finite token domain or is a
/// plain number.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureKind {
    Categorical { domain: Vec<String> },
    Numeric,
}

/// Where a feature value comes from: directly off the form, or derived
/// from other inputs at translation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    Base,
    /// weight / height², computed by the translator.
    DerivedBmi,
}

/// One named, typed column the artifact expects.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
    pub source: FeatureSource,
}

impl FeatureSpec {
    pub fn categorical(name: &str, domain: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: FeatureKind::Categorical {
                domain: domain.iter().map(|v| v.to_string()).collect(),
            },
            source: FeatureSource::Base,
        }
    }

    pub fn numeric(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FeatureKind::Numeric,
            source: FeatureSource::Base,
        }
    }

    pub fn derived_bmi(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FeatureKind::Numeric,
            source: FeatureSource::DerivedBmi,
        }
    }
}

/// Declared, ordered set of columns the trained artifact expects at
/// inference time. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    /// Build a schema, rejecting duplicate column names and empty
    /// categorical domains up front.
    pub fn new(features: Vec<FeatureSpec>) -> Result<Self, SchemaError> {
        for (i, spec) in features.iter().enumerate() {
            if features[..i].iter().any(|other| other.name == spec.name) {
                return Err(SchemaError::DuplicateColumn(spec.name.clone()));
            }
            if let FeatureKind::Categorical { domain } = &spec.kind {
                if domain.is_empty() {
                    return Err(SchemaError::EmptyDomain(spec.name.clone()));
                }
            }
        }
        Ok(Self { features })
    }

    /// The canonical schema version shipped with the current artifact:
    /// Portuguese column names, English value tokens, no derived BMI column.
    pub fn canonical() -> Self {
        let yes_no = ["yes", "no"];
        let frequency = ["Sometimes", "Frequently", "Always", "no"];

        Self::new(vec![
            FeatureSpec::categorical("Genero", &["Male", "Female"]),
            FeatureSpec::numeric("Idade"),
            FeatureSpec::numeric("Altura"),
            FeatureSpec::numeric("Peso"),
            FeatureSpec::categorical("Historico_Familiar_Obesidade", &yes_no),
            FeatureSpec::categorical("Frequencia_Consumo_Alimento_Calorico", &yes_no),
            FeatureSpec::numeric("Frequencia_Consumo_Vegetais"),
            FeatureSpec::numeric("Numero_Refeicoes_Principais"),
            FeatureSpec::categorical("Consumo_Alimento_Entre_Refeicoes", &frequency),
            FeatureSpec::categorical("Fumante", &yes_no),
            FeatureSpec::numeric("Consumo_Agua"),
            FeatureSpec::categorical("Monitoramento_Calorico", &yes_no),
            FeatureSpec::numeric("Frequencia_Atividade_Fisica"),
            FeatureSpec::numeric("Tempo_Uso_Tecnologia"),
            FeatureSpec::categorical("Consumo_Alcool", &frequency),
            FeatureSpec::categorical("Meio_Transporte", &[
                "Public_Transportation",
                "Walking",
                "Automobile",
                "Motorbike",
                "Bike",
            ]),
        ])
        .expect("canonical schema is statically well-formed")
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    pub fn get(&self, name: &str) -> Option<&FeatureSpec> {
        self.features.iter().find(|spec| spec.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
