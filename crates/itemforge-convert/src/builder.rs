//! Draft item assembly for one input row.

use crate::coerce::coerce;
use crate::dates::normalize;
use crate::error::ConvertError;
use itemforge_domain::traits::MappingResolver;
use itemforge_domain::{
    ClaimValue, DraftItem, EntityId, LanguageText, Qualifier, Qualifiers, Reference,
    SourceClaim, Statement,
};
use serde_json::Value;
use tracing::debug;

/// Dates inside references always use the ISO template.
const ISO_DATE_TEMPLATE: &str = "%Y-%m-%d";

/// Builds one [`DraftItem`] from a row's worth of add-* calls.
///
/// The builder owns exactly one draft, mutated in place and handed off
/// via [`ItemBuilder::finish`]. Labels and descriptions are append-only
/// with no dedup; statements keep call order.
pub struct ItemBuilder<'a, R: MappingResolver> {
    resolver: &'a R,
    item: DraftItem,
}

impl<'a, R: MappingResolver> ItemBuilder<'a, R> {
    /// Start an empty draft for one row.
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver, item: DraftItem::default() }
    }

    /// Append a label in the given language.
    pub fn add_label(&mut self, language: &str, text: &str) {
        self.item.labels.push(LanguageText::new(language, text));
    }

    /// Append a description in the given language.
    pub fn add_description(&mut self, language: &str, text: &str) {
        self.item.descriptions.push(LanguageText::new(language, text));
    }

    /// Set whether this row should be uploaded at all.
    pub fn set_upload(&mut self, upload: bool) {
        self.item.should_upload = upload;
    }

    /// Associate the draft with an already-existing remote record.
    /// No-op when no id is supplied.
    pub fn associate_existing(&mut self, id: Option<EntityId>) {
        if let Some(id) = id {
            self.item.existing_id = Some(id);
        }
    }

    /// Resolve a property name, coerce a raw value, and append the
    /// resulting statement to the draft.
    ///
    /// Qualifiers may be passed as a single [`Qualifier`], a `Vec`, or
    /// [`Qualifiers::none`]. Statement order is significant and
    /// preserved; nothing is merged or reordered here.
    pub fn add_statement(
        &mut self,
        prop_name: &str,
        raw: &Value,
        qualifiers: impl Into<Qualifiers>,
        reference: Option<Reference>,
    ) -> Result<(), ConvertError> {
        let property = self.resolver.resolve_property(prop_name)?;
        let value = coerce(raw)?;
        debug!(property = %property, "adding statement");
        self.item.statements.push(
            Statement::new(property, value)
                .with_qualifiers(qualifiers)
                .with_reference(reference),
        );
        Ok(())
    }

    /// Build an "applies to part" qualifier for the given part.
    pub fn qualifier_applies_to(&self, part: &str) -> Result<Qualifier, ConvertError> {
        let property = self.resolver.resolve_property("applies_to_part")?;
        Ok(Qualifier::new(property, ClaimValue::EntityRef(EntityId::new(part)?)))
    }

    /// Build a "stated in" reference.
    ///
    /// The stated-in claim is mandatory and always compared during
    /// duplicate detection. A publication-date claim is added when
    /// `pub_date` is given. The URL and retrieved-date claims are built
    /// only when both `ref_url` and `retrieved_date` are present; the
    /// URL joins the compared group, the dates never do. Consumers rely
    /// on exactly this partition to decide what counts as a duplicate
    /// reference during merge.
    pub fn build_reference(
        &self,
        stated_in: &str,
        pub_date: Option<&str>,
        ref_url: Option<&str>,
        retrieved_date: Option<&str>,
    ) -> Result<Reference, ConvertError> {
        let stated_in_claim = SourceClaim::new(
            self.resolver.resolve_property("stated_in")?,
            ClaimValue::EntityRef(EntityId::new(stated_in)?),
        );

        let published_claim = pub_date
            .map(|date| {
                Ok::<_, ConvertError>(SourceClaim::new(
                    self.resolver.resolve_property("publication_date")?,
                    ClaimValue::Date(normalize(date, ISO_DATE_TEMPLATE)?),
                ))
            })
            .transpose()?;

        if let (Some(url), Some(retrieved)) = (ref_url, retrieved_date) {
            let url_claim = SourceClaim::new(
                self.resolver.resolve_property("reference_url")?,
                ClaimValue::PlainText(url.to_string()),
            );
            let retrieved_claim = SourceClaim::new(
                self.resolver.resolve_property("retrieved")?,
                ClaimValue::Date(normalize(retrieved, ISO_DATE_TEMPLATE)?),
            );
            let non_test_sources = match published_claim {
                Some(published) => vec![published, retrieved_claim],
                None => vec![retrieved_claim],
            };
            return Ok(Reference::new(
                vec![stated_in_claim, url_claim],
                non_test_sources,
            ));
        }

        Ok(Reference::new(
            vec![stated_in_claim],
            published_claim.into_iter().collect(),
        ))
    }

    /// The draft as built so far.
    pub fn item(&self) -> &DraftItem {
        &self.item
    }

    /// Hand off the finished draft. The draft is immutable from here on.
    pub fn finish(self) -> DraftItem {
        self.item
    }
}
