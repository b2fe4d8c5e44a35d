//! The closed catalog of codemeta object kinds and the shapes their fields
//! accept.
//!
//! Each kind is a stack of field tables. Later tables take precedence, so
//! `SoftwareApplication.version` (text only) narrows the CreativeWork
//! `version` (text or number).

use std::fmt;

/// One accepted form of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Text,
    Url,
    Email,
    Date,
    Integer,
    Number,
    Bool,
    Context,
    DevelopmentStatus,
    Object(Kind),
    ListOf(&'static [Shape]),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Text => write!(f, "text"),
            Shape::Url => write!(f, "a URL"),
            Shape::Email => write!(f, "an email address"),
            Shape::Date => write!(f, "a date"),
            Shape::Integer => write!(f, "an integer"),
            Shape::Number => write!(f, "a number"),
            Shape::Bool => write!(f, "a boolean"),
            Shape::Context => write!(f, "a codemeta context"),
            Shape::DevelopmentStatus => write!(f, "a development status"),
            Shape::Object(kind) => write!(f, "{}", kind),
            Shape::ListOf(_) => write!(f, "a list"),
        }
    }
}

pub type Field = (&'static str, &'static [Shape]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Thing,
    Action,
    Event,
    StructuredValue,
    PropertyValue,
    Person,
    Organization,
    ComputerLanguage,
    ListItem,
    ItemList,
    AggregateRating,
    DefinedTermSet,
    DefinedTerm,
    CreativeWork,
    SoftwareApplication,
    SoftwareSourceCode,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Thing => "Thing",
            Kind::Action => "Action",
            Kind::Event => "Event",
            Kind::StructuredValue => "StructuredValue",
            Kind::PropertyValue => "PropertyValue",
            Kind::Person => "Person",
            Kind::Organization => "Organization",
            Kind::ComputerLanguage => "ComputerLanguage",
            Kind::ListItem => "ListItem",
            Kind::ItemList => "ItemList",
            Kind::AggregateRating => "AggregateRating",
            Kind::DefinedTermSet => "DefinedTermSet",
            Kind::DefinedTerm => "DefinedTerm",
            Kind::CreativeWork => "CreativeWork",
            Kind::SoftwareApplication => "SoftwareApplication",
            Kind::SoftwareSourceCode => "SoftwareSourceCode",
        }
    }

    /// The `@type` an object of this kind must carry, if it is fixed.
    ///
    /// Generic things and creative works accept any type name.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Kind::Thing | Kind::CreativeWork => None,
            kind => Some(kind.name()),
        }
    }

    /// Fields that must be present besides `@type`.
    pub fn required(self) -> &'static [&'static str] {
        match self {
            Kind::SoftwareApplication => &["name"],
            Kind::SoftwareSourceCode => &["@context"],
            _ => &[],
        }
    }

    fn layers(self) -> &'static [&'static [Field]] {
        match self {
            Kind::Thing | Kind::Action | Kind::Event | Kind::StructuredValue => &[THING],
            Kind::PropertyValue => &[THING, PROPERTY_VALUE],
            Kind::Person => &[THING, PERSON],
            Kind::Organization => &[THING, ORGANIZATION],
            Kind::ComputerLanguage => &[THING, COMPUTER_LANGUAGE],
            Kind::ListItem => &[THING, LIST_ITEM],
            Kind::ItemList => &[THING, ITEM_LIST],
            Kind::AggregateRating => &[THING, AGGREGATE_RATING],
            Kind::DefinedTermSet => &[THING, DEFINED_TERM_SET],
            Kind::DefinedTerm => &[THING, DEFINED_TERM],
            Kind::CreativeWork => &[THING, CREATIVE_WORK],
            Kind::SoftwareApplication => &[THING, CREATIVE_WORK, SOFTWARE_APPLICATION],
            Kind::SoftwareSourceCode => &[THING, CREATIVE_WORK, SOFTWARE_SOURCE_CODE],
        }
    }

    /// The shapes accepted for `field`, or `None` if the field is unknown.
    pub fn field(self, field: &str) -> Option<&'static [Shape]> {
        self.layers()
            .iter()
            .rev()
            .find_map(|table| table.iter().find(|(name, _)| *name == field))
            .map(|(_, shapes)| *shapes)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use Kind::*;
use Shape::{Bool, Context, Date, Email, Integer, ListOf, Number, Object, Text, Url};

const TEXT: &[Shape] = &[Text];
const URL: &[Shape] = &[Url];
const EMAIL: &[Shape] = &[Email];
const DATE: &[Shape] = &[Date];
const INTEGER: &[Shape] = &[Integer];
const NUMBER: &[Shape] = &[Number];
const BOOL: &[Shape] = &[Bool];

const AGENT: &[Shape] = &[Object(Organization), Object(Person)];
const AGENTS: &[Shape] = &[Object(Organization), Object(Person), ListOf(AGENT)];
const TEXT_OR_THING: &[Shape] = &[Text, Object(Thing)];
const TEXT_OR_WORK: &[Shape] = &[Text, Object(CreativeWork)];
const TEXT_OR_TERM: &[Shape] = &[Text, Object(DefinedTerm)];
const URL_OR_WORK: &[Shape] = &[Url, Object(CreativeWork)];
const TEXT_OR_ORGANIZATION: &[Shape] = &[Text, Object(Organization)];
const TEXT_OR_AGENT: &[Shape] = &[Text, Object(Organization), Object(Person)];
const SOFTWARE: &[Shape] = &[Object(SoftwareApplication), Object(SoftwareSourceCode)];
const TEXT_OR_SOFTWARE: &[Shape] = &[Text, ListOf(SOFTWARE)];
const ACTION: &[Shape] = &[Object(Action)];
const LIST_ELEMENT: &[Shape] = &[Text, Object(Thing), Object(ListItem)];

const THING: &[Field] = &[
    ("additionalType", TEXT),
    ("alternateName", TEXT),
    ("description", TEXT),
    ("disambiguatingDescription", TEXT),
    ("identifier", &[Text, Object(PropertyValue)]),
    ("image", TEXT),
    ("mainEntityOfPage", TEXT_OR_WORK),
    ("name", TEXT),
    ("potentialAction", &[Object(Action), ListOf(ACTION)]),
    ("sameAs", URL),
    ("subjectOf", &[Text, Object(CreativeWork), Object(Event)]),
    ("url", URL),
];

const PROPERTY_VALUE: &[Field] = &[
    ("maxValue", NUMBER),
    ("measurementMethod", TEXT),
    ("measurementTechnique", TEXT),
    ("minValue", NUMBER),
    ("propertyID", TEXT),
    ("unitCode", TEXT),
    ("value", &[Text, Number, Bool, Object(StructuredValue)]),
    (
        "valueReference",
        &[Text, Object(PropertyValue), Object(StructuredValue)],
    ),
];

const PERSON: &[Field] = &[
    ("@id", TEXT),
    ("affiliation", TEXT_OR_ORGANIZATION),
    ("description", TEXT),
    ("email", EMAIL),
    ("familyName", TEXT),
    ("givenName", TEXT),
];

const ORGANIZATION: &[Field] = &[
    ("@id", TEXT),
    ("address", TEXT),
    ("description", TEXT),
    ("email", EMAIL),
];

const COMPUTER_LANGUAGE: &[Field] = &[("version", TEXT)];

const LIST_ITEM: &[Field] = &[
    ("item", TEXT_OR_THING),
    ("nextItem", &[Text, Object(ListItem)]),
    ("position", &[Integer, Text]),
    ("previousItem", &[Text, Object(ListItem)]),
];

const ITEM_LIST: &[Field] = &[
    (
        "itemListElement",
        &[Text, Object(Thing), Object(ListItem), ListOf(LIST_ELEMENT)],
    ),
    ("itemListOrder", TEXT),
    ("numberOfItems", INTEGER),
];

const AGGREGATE_RATING: &[Field] = &[
    ("itemReviewed", TEXT_OR_THING),
    ("ratingCount", INTEGER),
    ("reviewCount", INTEGER),
];

const DEFINED_TERM_SET: &[Field] = &[(
    "hasDefinedTerm",
    &[Text, Object(DefinedTerm), ListOf(TEXT_OR_TERM)],
)];

const DEFINED_TERM: &[Field] = &[
    ("inDefinedTermSet", &[Text, Object(DefinedTermSet)]),
    ("termCode", TEXT),
];

const CREATIVE_WORK: &[Field] = &[
    ("about", TEXT_OR_THING),
    ("abstract", TEXT),
    ("accessMode", TEXT),
    ("accessModeSufficient", &[Text, Object(ItemList)]),
    ("accessibilityAPI", TEXT),
    ("accessibilityControl", TEXT),
    ("accessibilityFeature", TEXT),
    ("accessibilityHazard", TEXT),
    ("accessibilitySummary", TEXT),
    ("accountablePerson", &[Object(Person)]),
    ("acquireLicensePage", URL_OR_WORK),
    ("aggregateRating", &[Object(AggregateRating)]),
    ("alternativeHeadline", TEXT),
    ("archivedAt", TEXT),
    ("assesses", TEXT_OR_TERM),
    ("associatedMedia", TEXT),
    ("audience", TEXT),
    ("audio", TEXT),
    ("author", AGENTS),
    ("award", TEXT),
    ("character", &[Text, Object(Person)]),
    ("citation", TEXT_OR_WORK),
    ("comment", TEXT),
    ("commentCount", INTEGER),
    ("conditionsOfAccess", TEXT),
    ("contentLocation", TEXT),
    ("contentRating", TEXT),
    ("contentReferenceTime", DATE),
    ("contributor", AGENTS),
    ("copyrightHolder", AGENTS),
    ("copyrightNotice", TEXT),
    ("copyrightYear", NUMBER),
    ("correction", TEXT),
    ("countryOfOrigin", TEXT),
    ("creativeWorkStatus", TEXT_OR_TERM),
    ("creator", AGENTS),
    ("creditText", TEXT),
    ("dateCreated", DATE),
    ("dateModified", DATE),
    ("datePublished", DATE),
    ("digitalSourceType", TEXT),
    ("discussionUrl", URL),
    ("editEIDR", TEXT),
    ("editor", &[Object(Person), ListOf(&[Object(Person)])]),
    ("educationalAlignment", &[Text, ListOf(TEXT)]),
    ("educationalLevel", TEXT_OR_TERM),
    ("educationalUse", TEXT_OR_TERM),
    ("encoding", TEXT),
    ("encodingFormat", TEXT),
    ("exampleOfWork", TEXT_OR_WORK),
    ("expires", DATE),
    ("funder", TEXT_OR_AGENT),
    ("funding", TEXT),
    ("genre", TEXT),
    ("hasPart", TEXT_OR_WORK),
    ("headline", TEXT),
    ("inLanguage", TEXT),
    ("interactionStatistic", TEXT),
    ("interactivityType", TEXT),
    ("interpretedAsClaim", TEXT),
    ("isAccessibleForFree", BOOL),
    ("isBasedOn", TEXT_OR_WORK),
    ("isFamilyFriendly", BOOL),
    ("isPartOf", TEXT_OR_WORK),
    ("keywords", &[Text, ListOf(TEXT)]),
    ("learningResourceType", TEXT_OR_TERM),
    ("license", URL_OR_WORK),
    ("locationCreated", TEXT),
    ("mainEntity", TEXT_OR_THING),
    ("maintainer", AGENTS),
    ("material", TEXT),
    ("materialExtent", TEXT),
    ("mentions", &[Object(Thing)]),
    ("offers", TEXT),
    ("pattern", TEXT_OR_TERM),
    ("position", &[Integer, Text]),
    ("producer", AGENTS),
    ("provider", AGENTS),
    ("publication", TEXT),
    ("publisher", AGENTS),
    ("publisherInprint", TEXT_OR_ORGANIZATION),
    ("publishingPrinciples", TEXT_OR_WORK),
    ("recordedAt", TEXT),
    ("releasedEvent", TEXT),
    ("review", TEXT),
    ("schemaVersion", TEXT),
    ("sdDatePublished", DATE),
    ("sdLicense", TEXT_OR_WORK),
    ("sdPublisher", TEXT_OR_AGENT),
    ("size", TEXT_OR_TERM),
    ("sourceOrganization", TEXT_OR_ORGANIZATION),
    ("spatial", TEXT),
    ("spatialCoverage", TEXT),
    ("sponsor", AGENTS),
    ("teaches", TEXT_OR_TERM),
    ("temporal", TEXT),
    ("temporalCoverage", TEXT),
    ("text", TEXT),
    ("thumbnail", TEXT),
    ("thumbnailUrl", URL),
    ("timeRequired", TEXT),
    ("translationOfWork", TEXT_OR_WORK),
    ("translator", AGENTS),
    ("typicalAgeRange", TEXT),
    ("usageInfo", TEXT_OR_WORK),
    ("version", &[Text, Number]),
    ("video", TEXT),
    ("workExample", TEXT_OR_WORK),
    ("workTranslation", TEXT_OR_WORK),
];

const SOFTWARE_APPLICATION: &[Field] = &[
    ("name", TEXT),
    ("version", TEXT),
    ("provider", AGENTS),
];

const SOFTWARE_SOURCE_CODE: &[Field] = &[
    ("@context", &[Context]),
    ("applicationCategory", TEXT),
    ("applicationSubCategory", TEXT),
    ("codeRepository", URL),
    ("downloadUrl", URL),
    ("fileFormat", TEXT),
    ("fileSize", TEXT),
    ("installUrl", URL),
    ("memoryRequirements", TEXT),
    ("operatingSystem", TEXT),
    ("permissions", TEXT),
    ("processorRequirements", TEXT),
    ("programmingLanguage", &[Text, Object(ComputerLanguage)]),
    ("relatedLink", URL),
    ("releaseNotes", TEXT),
    ("runtimePlatform", TEXT),
    ("softwareHelp", &[Text, Object(SoftwareSourceCode)]),
    ("softwareRequirements", TEXT_OR_SOFTWARE),
    ("storageRequirements", TEXT),
    ("supportingData", TEXT),
    ("targetProduct", TEXT),
    // codemeta terms
    ("buildInstructions", URL),
    ("continuousIntegration", &[Url, ListOf(URL)]),
    ("developmentStatus", &[Shape::DevelopmentStatus]),
    ("embargoEndDate", DATE),
    ("funding", TEXT),
    ("hasSourceCode", &[Object(SoftwareSourceCode)]),
    ("isSourceOf", &[Object(SoftwareSourceCode)]),
    ("issueTracker", URL),
    ("maintainer", AGENTS),
    ("readme", URL),
    ("referencePublication", TEXT),
    ("softwareSuggestions", TEXT_OR_SOFTWARE),
];

/// The `@context` values a root document may declare.
pub const CONTEXTS: &[&str] = &[
    "https://w3id.org/codemeta/3.0",
    "https://raw.githubusercontent.com/codemeta/codemeta/master/codemeta.json",
    "https://doi.org/10.5063/schema/codemeta-2.0",
    "https://raw.githubusercontent.com/codemeta/codemeta/master/codemeta.jsonld",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_fields_take_precedence() {
        assert_eq!(Kind::CreativeWork.field("version"), Some(&[Text, Number][..]));
        assert_eq!(Kind::SoftwareApplication.field("version"), Some(TEXT));
    }

    #[test]
    fn test_inherited_fields() {
        assert_eq!(Kind::Person.field("url"), Some(URL));
        assert_eq!(Kind::SoftwareSourceCode.field("author"), Some(AGENTS));
        assert_eq!(Kind::SoftwareSourceCode.field("dateCreated"), Some(DATE));
    }

    #[test]
    fn test_closed_catalogs() {
        assert_eq!(Kind::Person.field("codeRepository"), None);
        assert_eq!(Kind::Thing.field("email"), None);
        assert_eq!(Kind::SoftwareSourceCode.field("@id"), None);
    }

    #[test]
    fn test_tags() {
        assert_eq!(Kind::Person.tag(), Some("Person"));
        assert_eq!(Kind::CreativeWork.tag(), None);
        assert_eq!(Kind::SoftwareSourceCode.tag(), Some("SoftwareSourceCode"));
    }
}
