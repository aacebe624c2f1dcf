use crate::catalog::Section;

/// Which menu the session is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    /// Picking items from one catalog section.
    Browse(Section),
    /// Picking a payment method for checkout.
    Payment,
}

/// Main menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Exit,
    AddService,
    AddProduct,
    ShowOrder,
    Checkout,
}

impl TryFrom<u32> for MainChoice {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MainChoice::Exit),
            1 => Ok(MainChoice::AddService),
            2 => Ok(MainChoice::AddProduct),
            3 => Ok(MainChoice::ShowOrder),
            4 => Ok(MainChoice::Checkout),
            other => Err(other),
        }
    }
}
