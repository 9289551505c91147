//! The form shared by the transaction creation and editing views.

use maud::{Markup, html};
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::{
    api::date_format::{format_date, parse_date},
    category::{Category, CategoryId},
    endpoints,
    html::{
        FORM_CONTAINER_TARGET, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        TextInput, submit_button,
    },
    transaction::core::{
        Transaction, TransactionType, format_amount_input, parse_amount_in_cents,
    },
};

const CATEGORY_FIELD_ID: &str = "category-field";

/// The raw form fields as typed by the user.
///
/// Every field is kept as text so the form can be shown again, unchanged,
/// next to its validation messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    #[serde(rename = "type", default, deserialize_with = "deserialize_transaction_type")]
    pub type_: Option<TransactionType>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: String,
}

/// An unchecked radio group submits `type=`, which is read as no choice.
///
/// Unknown values are also read as no choice so validation can report them.
fn deserialize_transaction_type<'de, D>(
    deserializer: D,
) -> Result<Option<TransactionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    Ok(match value.trim() {
        "income" => Some(TransactionType::Income),
        "expense" => Some(TransactionType::Expense),
        _ => None,
    })
}

/// A transaction form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ValidTransaction {
    pub type_: TransactionType,
    pub title: String,
    pub amount_in_cents: u64,
    pub date: Date,
    pub category_id: CategoryId,
    pub description: Option<String>,
}

/// Validation messages for each field of [TransactionFormData].
#[derive(Debug, Default, PartialEq)]
pub(super) struct TransactionFormErrors {
    pub type_: Option<String>,
    pub title: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
}

impl TransactionFormData {
    /// An empty expense dated `today`.
    pub(super) fn new_expense(today: Date) -> Self {
        Self {
            type_: Some(TransactionType::Expense),
            date: format_date(today),
            ..Default::default()
        }
    }

    pub(super) fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            type_: Some(transaction.type_),
            title: transaction.title.clone(),
            amount: format_amount_input(transaction.amount_in_cents),
            date: format_date(transaction.date),
            category_id: transaction.category_id.to_string(),
            description: transaction.description.clone().unwrap_or_default(),
        }
    }

    /// Check every field, collecting a message for each invalid one.
    pub(super) fn validate(&self) -> Result<ValidTransaction, TransactionFormErrors> {
        let mut errors = TransactionFormErrors::default();

        let type_ = self.type_;
        if type_.is_none() {
            errors.type_ = Some("Choose income or expense".to_owned());
        }

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required".to_owned());
        }

        let amount_in_cents = parse_amount_in_cents(&self.amount)
            .inspect_err(|error| errors.amount = Some(error.to_string()))
            .ok();

        let date = if self.date.trim().is_empty() {
            errors.date = Some("Date is required".to_owned());
            None
        } else {
            parse_date(&self.date)
                .inspect_err(|error| errors.date = Some(error.to_string()))
                .ok()
        };

        let category_id = self.category_id.trim().parse::<CategoryId>().ok();
        if category_id.is_none() {
            errors.category = Some("Choose a category".to_owned());
        }

        match (type_, amount_in_cents, date, category_id) {
            (Some(type_), Some(amount_in_cents), Some(date), Some(category_id))
                if errors.title.is_none() =>
            {
                let description = self.description.trim();

                Ok(ValidTransaction {
                    type_,
                    title: title.to_owned(),
                    amount_in_cents,
                    date,
                    category_id,
                    description: (!description.is_empty()).then(|| description.to_owned()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Where and how the transaction form is submitted.
pub(super) enum TransactionFormAction<'a> {
    Create(&'a str),
    Update(&'a str),
}

pub(super) fn transaction_form_view(
    action: TransactionFormAction<'_>,
    form: &TransactionFormData,
    categories: &[Category],
    errors: &TransactionFormErrors,
) -> Markup {
    let (hx_post, hx_put, button_text) = match action {
        TransactionFormAction::Create(endpoint) => (Some(endpoint), None, "Add Transaction"),
        TransactionFormAction::Update(endpoint) => (None, Some(endpoint), "Save Changes"),
    };
    let is_income = form.type_ == Some(TransactionType::Income);
    let is_expense = form.type_ == Some(TransactionType::Expense);
    let selected_category = form.category_id.trim().parse::<CategoryId>().ok();

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target=(FORM_CONTAINER_TARGET)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Transaction type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-expense"
                            type="radio"
                            value=(TransactionType::Expense.as_str())
                            checked[is_expense]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-expense" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (TransactionType::Expense.label())
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-income"
                            type="radio"
                            value=(TransactionType::Income.as_str())
                            checked[is_income]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-income" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (TransactionType::Income.label())
                        }
                    }
                }

                @if let Some(message) = &errors.type_ {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            (TextInput {
                label: "Title",
                name: "title",
                type_: "text",
                value: &form.title,
                placeholder: "Groceries",
                required: true,
                error_message: errors.title.as_deref(),
            }.into_html())

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="text"
                        inputmode="decimal"
                        placeholder="0,00"
                        value=(form.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if let Some(message) = &errors.amount {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            (TextInput {
                label: "Date",
                name: "date",
                type_: "date",
                value: &form.date,
                placeholder: "",
                required: true,
                error_message: errors.date.as_deref(),
            }.into_html())

            (category_field_view(
                categories,
                selected_category,
                errors.category.as_deref(),
                &NewCategoryInput::default(),
            ))

            (TextInput {
                label: "Description",
                name: "description",
                type_: "text",
                value: &form.description,
                placeholder: "Optional notes",
                required: false,
                error_message: None,
            }.into_html())

            (submit_button(button_text))
        }
    }
}

/// The inline "new category" input under the category select.
#[derive(Debug, Default)]
pub(super) struct NewCategoryInput<'a> {
    pub name: &'a str,
    pub error_message: Option<&'a str>,
}

/// The category select, swapped out whole when a category is added inline.
pub(super) fn category_field_view(
    categories: &[Category],
    selected_category: Option<CategoryId>,
    error_message: Option<&str>,
    new_category: &NewCategoryInput<'_>,
) -> Markup {
    html! {
        div id=(CATEGORY_FIELD_ID)
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="category_id"
                id="category_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected_category.is_none()] { "Select a category" }

                @for category in categories {
                    option
                        value=(category.id)
                        selected[selected_category == Some(category.id)]
                    {
                        (category.name)
                    }
                }
            }

            @if let Some(message) = error_message {
                p class=(FORM_ERROR_STYLE) { (message) }
            }

            div class="mt-2 flex items-center gap-2"
            {
                input
                    name="new_category_name"
                    id="new_category_name"
                    type="text"
                    placeholder="New category"
                    aria-label="New category name"
                    value=(new_category.name)
                    class=(FORM_TEXT_INPUT_STYLE);

                button
                    type="button"
                    hx-post=(endpoints::TRANSACTION_CATEGORIES_API)
                    hx-params="new_category_name,category_id"
                    hx-target=(format!("#{CATEGORY_FIELD_ID}"))
                    hx-swap="outerHTML"
                    class=(LINK_STYLE)
                {
                    "Add"
                }
            }

            @if let Some(message) = new_category.error_message {
                p class=(FORM_ERROR_STYLE) { (message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use time::macros::date;

    use crate::{
        category::Category,
        endpoints,
        test_utils::{
            assert_form_input, assert_form_input_with_value, assert_form_submit_button,
            assert_hx_endpoint, assert_valid_html, must_get_form, select_options, select_text,
        },
        transaction::core::TransactionType,
    };

    use super::{
        TransactionFormAction, TransactionFormData, TransactionFormErrors, ValidTransaction,
        transaction_form_view,
    };

    fn valid_form() -> TransactionFormData {
        TransactionFormData {
            type_: Some(TransactionType::Expense),
            title: " Mercado ".to_owned(),
            amount: "123,45".to_owned(),
            date: "2024-01-15".to_owned(),
            category_id: "3".to_owned(),
            description: "  ".to_owned(),
        }
    }

    #[test]
    fn validate_accepts_complete_form() {
        assert_eq!(
            valid_form().validate(),
            Ok(ValidTransaction {
                type_: TransactionType::Expense,
                title: "Mercado".to_owned(),
                amount_in_cents: 12345,
                date: date!(2024 - 01 - 15),
                category_id: 3,
                description: None,
            })
        );
    }

    #[test]
    fn validate_reports_every_invalid_field() {
        let form = TransactionFormData::default();

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            TransactionFormErrors {
                type_: Some("Choose income or expense".to_owned()),
                title: Some("Title is required".to_owned()),
                amount: Some("Amount is required".to_owned()),
                date: Some("Date is required".to_owned()),
                category: Some("Choose a category".to_owned()),
            }
        );
    }

    #[test]
    fn validate_rejects_bad_amount_and_date() {
        let form = TransactionFormData {
            amount: "12.345".to_owned(),
            date: "15/01/2024".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.amount.as_deref(),
            Some("Amount can have at most two decimal places")
        );
        assert_eq!(errors.date.as_deref(), Some("\"15/01/2024\" is not a valid date"));
        assert_eq!(errors.title, None);
    }

    #[test]
    fn blank_title_alone_fails_validation() {
        let form = TransactionFormData {
            title: "   ".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.title.as_deref(), Some("Title is required"));
        assert_eq!(errors.amount, None);
    }

    #[test]
    fn deserializes_empty_type_as_missing() {
        let form: TransactionFormData = serde_html_form::from_str(
            "type=&title=Uber&amount=25&date=2024-02-01&category_id=&description=",
        )
        .unwrap();

        assert_eq!(form.type_, None);
        assert_eq!(form.title, "Uber");
        assert_eq!(form.category_id, "");
    }

    #[test]
    fn deserializes_unknown_type_as_missing() {
        let form: TransactionFormData =
            serde_html_form::from_str("type=transfer&title=Pix").unwrap();

        assert_eq!(form.type_, None);
        assert_eq!(
            form.validate().unwrap_err().type_.as_deref(),
            Some("Choose income or expense")
        );
    }

    #[test]
    fn deserializes_income_type() {
        let form: TransactionFormData =
            serde_html_form::from_str("type=income&title=Salário").unwrap();

        assert_eq!(form.type_, Some(TransactionType::Income));
        assert_eq!(form.amount, "");
    }

    #[test]
    fn renders_fields_with_selected_category() {
        let categories = [
            Category {
                id: 2,
                name: "Transporte".to_owned(),
            },
            Category {
                id: 3,
                name: "Alimentação".to_owned(),
            },
        ];
        let markup = transaction_form_view(
            TransactionFormAction::Update("/api/transactions/7"),
            &valid_form(),
            &categories,
            &TransactionFormErrors::default(),
        );

        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/transactions/7", "hx-put");
        assert_form_input(&form, "title", "text", true);
        assert_form_input(&form, "amount", "text", true);
        assert_form_input(&form, "date", "date", true);
        assert_form_input(&form, "description", "text", false);
        assert_form_input_with_value(&form, "amount", "123,45");
        assert_form_submit_button(&form, "Save Changes");
        assert_eq!(
            select_options(&form, "category_id"),
            vec![
                ("".to_owned(), "Select a category".to_owned(), false),
                ("2".to_owned(), "Transporte".to_owned(), false),
                ("3".to_owned(), "Alimentação".to_owned(), true),
            ]
        );
        assert!(select_text(&html, "p.text-red-600").is_empty());
    }

    #[test]
    fn category_field_can_add_a_category_inline() {
        let markup = transaction_form_view(
            TransactionFormAction::Create("/api/transactions"),
            &valid_form(),
            &[],
            &TransactionFormErrors::default(),
        );

        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_input(&form, "new_category_name", "text", false);
        let button = form
            .select(&scraper::Selector::parse("#category-field button[type=button]").unwrap())
            .next()
            .expect("no add category button");
        assert_eq!(
            button.value().attr("hx-post"),
            Some(endpoints::TRANSACTION_CATEGORIES_API)
        );
        assert_eq!(button.value().attr("hx-target"), Some("#category-field"));
        assert_eq!(button.value().attr("hx-swap"), Some("outerHTML"));
    }

    #[test]
    fn renders_each_error_message() {
        let errors = TransactionFormData::default().validate().unwrap_err();
        let markup = transaction_form_view(
            TransactionFormAction::Create("/api/transactions"),
            &TransactionFormData::default(),
            &[],
            &errors,
        );

        let html = Html::parse_fragment(&markup.into_string());
        assert_eq!(
            select_text(&html, "p.text-red-600"),
            vec![
                "Choose income or expense",
                "Title is required",
                "Amount is required",
                "Date is required",
                "Choose a category",
            ]
        );
    }
}
