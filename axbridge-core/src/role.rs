//! Closed classifications of a node's semantic UI type.
//!
//! [`Role`] and [`Subrole`] are the typed rendition of the raw classification
//! strings the native protocol reports.  Both carry an `Unknown` sentinel:
//! classification must always succeed, so any identifier outside the known
//! set resolves to `Unknown` at the conversion layer rather than failing the
//! read.

/// Role of an accessibility node (e.g. a button, a window, a text field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Application,
    SystemWide,
    Window,
    Sheet,
    Drawer,
    Button,
    RadioButton,
    RadioGroup,
    CheckBox,
    PopUpButton,
    MenuButton,
    TabGroup,
    Table,
    Column,
    Row,
    Cell,
    Outline,
    Browser,
    ScrollArea,
    ScrollBar,
    ValueIndicator,
    LevelIndicator,
    ProgressIndicator,
    BusyIndicator,
    RelevanceIndicator,
    Image,
    StaticText,
    TextField,
    TextArea,
    Menu,
    MenuBar,
    MenuBarItem,
    MenuItem,
    List,
    Group,
    Slider,
    Incrementor,
    ComboBox,
    SplitGroup,
    Splitter,
    ColorWell,
    Toolbar,
    DisclosureTriangle,
    Link,
    Popover,
    Grid,
    HelpTag,
    Matte,
    DockItem,
    Ruler,
    RulerMarker,
    LayoutArea,
    LayoutItem,
    GrowArea,
    Handle,
    Unknown,
}

impl Role {
    /// Map a raw role identifier to the closed enum.
    ///
    /// Returns `None` for identifiers outside the known set; the conversion
    /// layer is responsible for degrading those to [`Role::Unknown`].
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let role = match identifier {
            "AXApplication" => Role::Application,
            "AXSystemWide" => Role::SystemWide,
            "AXWindow" => Role::Window,
            "AXSheet" => Role::Sheet,
            "AXDrawer" => Role::Drawer,
            "AXButton" => Role::Button,
            "AXRadioButton" => Role::RadioButton,
            "AXRadioGroup" => Role::RadioGroup,
            "AXCheckBox" => Role::CheckBox,
            "AXPopUpButton" => Role::PopUpButton,
            "AXMenuButton" => Role::MenuButton,
            "AXTabGroup" => Role::TabGroup,
            "AXTable" => Role::Table,
            "AXColumn" => Role::Column,
            "AXRow" => Role::Row,
            "AXCell" => Role::Cell,
            "AXOutline" => Role::Outline,
            "AXBrowser" => Role::Browser,
            "AXScrollArea" => Role::ScrollArea,
            "AXScrollBar" => Role::ScrollBar,
            "AXValueIndicator" => Role::ValueIndicator,
            "AXLevelIndicator" => Role::LevelIndicator,
            "AXProgressIndicator" => Role::ProgressIndicator,
            "AXBusyIndicator" => Role::BusyIndicator,
            "AXRelevanceIndicator" => Role::RelevanceIndicator,
            "AXImage" => Role::Image,
            "AXStaticText" => Role::StaticText,
            "AXTextField" => Role::TextField,
            "AXTextArea" => Role::TextArea,
            "AXMenu" => Role::Menu,
            "AXMenuBar" => Role::MenuBar,
            "AXMenuBarItem" => Role::MenuBarItem,
            "AXMenuItem" => Role::MenuItem,
            "AXList" => Role::List,
            "AXGroup" => Role::Group,
            "AXSlider" => Role::Slider,
            "AXIncrementor" => Role::Incrementor,
            "AXComboBox" => Role::ComboBox,
            "AXSplitGroup" => Role::SplitGroup,
            "AXSplitter" => Role::Splitter,
            "AXColorWell" => Role::ColorWell,
            "AXToolbar" => Role::Toolbar,
            "AXDisclosureTriangle" => Role::DisclosureTriangle,
            "AXLink" => Role::Link,
            "AXPopover" => Role::Popover,
            "AXGrid" => Role::Grid,
            "AXHelpTag" => Role::HelpTag,
            "AXMatte" => Role::Matte,
            "AXDockItem" => Role::DockItem,
            "AXRuler" => Role::Ruler,
            "AXRulerMarker" => Role::RulerMarker,
            "AXLayoutArea" => Role::LayoutArea,
            "AXLayoutItem" => Role::LayoutItem,
            "AXGrowArea" => Role::GrowArea,
            "AXHandle" => Role::Handle,
            "AXUnknown" => Role::Unknown,
            _ => return None,
        };
        Some(role)
    }

    /// The raw identifier for this role.
    pub fn identifier(self) -> &'static str {
        match self {
            Role::Application => "AXApplication",
            Role::SystemWide => "AXSystemWide",
            Role::Window => "AXWindow",
            Role::Sheet => "AXSheet",
            Role::Drawer => "AXDrawer",
            Role::Button => "AXButton",
            Role::RadioButton => "AXRadioButton",
            Role::RadioGroup => "AXRadioGroup",
            Role::CheckBox => "AXCheckBox",
            Role::PopUpButton => "AXPopUpButton",
            Role::MenuButton => "AXMenuButton",
            Role::TabGroup => "AXTabGroup",
            Role::Table => "AXTable",
            Role::Column => "AXColumn",
            Role::Row => "AXRow",
            Role::Cell => "AXCell",
            Role::Outline => "AXOutline",
            Role::Browser => "AXBrowser",
            Role::ScrollArea => "AXScrollArea",
            Role::ScrollBar => "AXScrollBar",
            Role::ValueIndicator => "AXValueIndicator",
            Role::LevelIndicator => "AXLevelIndicator",
            Role::ProgressIndicator => "AXProgressIndicator",
            Role::BusyIndicator => "AXBusyIndicator",
            Role::RelevanceIndicator => "AXRelevanceIndicator",
            Role::Image => "AXImage",
            Role::StaticText => "AXStaticText",
            Role::TextField => "AXTextField",
            Role::TextArea => "AXTextArea",
            Role::Menu => "AXMenu",
            Role::MenuBar => "AXMenuBar",
            Role::MenuBarItem => "AXMenuBarItem",
            Role::MenuItem => "AXMenuItem",
            Role::List => "AXList",
            Role::Group => "AXGroup",
            Role::Slider => "AXSlider",
            Role::Incrementor => "AXIncrementor",
            Role::ComboBox => "AXComboBox",
            Role::SplitGroup => "AXSplitGroup",
            Role::Splitter => "AXSplitter",
            Role::ColorWell => "AXColorWell",
            Role::Toolbar => "AXToolbar",
            Role::DisclosureTriangle => "AXDisclosureTriangle",
            Role::Link => "AXLink",
            Role::Popover => "AXPopover",
            Role::Grid => "AXGrid",
            Role::HelpTag => "AXHelpTag",
            Role::Matte => "AXMatte",
            Role::DockItem => "AXDockItem",
            Role::Ruler => "AXRuler",
            Role::RulerMarker => "AXRulerMarker",
            Role::LayoutArea => "AXLayoutArea",
            Role::LayoutItem => "AXLayoutItem",
            Role::GrowArea => "AXGrowArea",
            Role::Handle => "AXHandle",
            Role::Unknown => "AXUnknown",
        }
    }
}

/// Specialized subtype of a node's role (e.g. which kind of window button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subrole {
    CloseButton,
    MinimizeButton,
    ZoomButton,
    FullScreenButton,
    ToolbarButton,
    StandardWindow,
    Dialog,
    SystemDialog,
    FloatingWindow,
    SystemFloatingWindow,
    IncrementArrow,
    DecrementArrow,
    IncrementPage,
    DecrementPage,
    SearchField,
    SecureTextField,
    TextAttachment,
    TextLink,
    Timeline,
    SortButton,
    RatingIndicator,
    ContentList,
    DefinitionList,
    DescriptionList,
    CollectionList,
    SectionList,
    OutlineRow,
    TableRow,
    TabButton,
    Switch,
    Toggle,
    Segment,
    LandmarkMain,
    LandmarkNavigation,
    EmptyGroup,
    Unknown,
}

impl Subrole {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let subrole = match identifier {
            "AXCloseButton" => Subrole::CloseButton,
            "AXMinimizeButton" => Subrole::MinimizeButton,
            "AXZoomButton" => Subrole::ZoomButton,
            "AXFullScreenButton" => Subrole::FullScreenButton,
            "AXToolbarButton" => Subrole::ToolbarButton,
            "AXStandardWindow" => Subrole::StandardWindow,
            "AXDialog" => Subrole::Dialog,
            "AXSystemDialog" => Subrole::SystemDialog,
            "AXFloatingWindow" => Subrole::FloatingWindow,
            "AXSystemFloatingWindow" => Subrole::SystemFloatingWindow,
            "AXIncrementArrow" => Subrole::IncrementArrow,
            "AXDecrementArrow" => Subrole::DecrementArrow,
            "AXIncrementPage" => Subrole::IncrementPage,
            "AXDecrementPage" => Subrole::DecrementPage,
            "AXSearchField" => Subrole::SearchField,
            "AXSecureTextField" => Subrole::SecureTextField,
            "AXTextAttachment" => Subrole::TextAttachment,
            "AXTextLink" => Subrole::TextLink,
            "AXTimeline" => Subrole::Timeline,
            "AXSortButton" => Subrole::SortButton,
            "AXRatingIndicator" => Subrole::RatingIndicator,
            "AXContentList" => Subrole::ContentList,
            "AXDefinitionList" => Subrole::DefinitionList,
            "AXDescriptionList" => Subrole::DescriptionList,
            "AXCollectionList" => Subrole::CollectionList,
            "AXSectionList" => Subrole::SectionList,
            "AXOutlineRow" => Subrole::OutlineRow,
            "AXTableRow" => Subrole::TableRow,
            "AXTabButton" => Subrole::TabButton,
            "AXSwitch" => Subrole::Switch,
            "AXToggle" => Subrole::Toggle,
            "AXSegment" => Subrole::Segment,
            "AXLandmarkMain" => Subrole::LandmarkMain,
            "AXLandmarkNavigation" => Subrole::LandmarkNavigation,
            "AXEmptyGroup" => Subrole::EmptyGroup,
            "AXUnknown" => Subrole::Unknown,
            _ => return None,
        };
        Some(subrole)
    }

    pub fn identifier(self) -> &'static str {
        match self {
            Subrole::CloseButton => "AXCloseButton",
            Subrole::MinimizeButton => "AXMinimizeButton",
            Subrole::ZoomButton => "AXZoomButton",
            Subrole::FullScreenButton => "AXFullScreenButton",
            Subrole::ToolbarButton => "AXToolbarButton",
            Subrole::StandardWindow => "AXStandardWindow",
            Subrole::Dialog => "AXDialog",
            Subrole::SystemDialog => "AXSystemDialog",
            Subrole::FloatingWindow => "AXFloatingWindow",
            Subrole::SystemFloatingWindow => "AXSystemFloatingWindow",
            Subrole::IncrementArrow => "AXIncrementArrow",
            Subrole::DecrementArrow => "AXDecrementArrow",
            Subrole::IncrementPage => "AXIncrementPage",
            Subrole::DecrementPage => "AXDecrementPage",
            Subrole::SearchField => "AXSearchField",
            Subrole::SecureTextField => "AXSecureTextField",
            Subrole::TextAttachment => "AXTextAttachment",
            Subrole::TextLink => "AXTextLink",
            Subrole::Timeline => "AXTimeline",
            Subrole::SortButton => "AXSortButton",
            Subrole::RatingIndicator => "AXRatingIndicator",
            Subrole::ContentList => "AXContentList",
            Subrole::DefinitionList => "AXDefinitionList",
            Subrole::DescriptionList => "AXDescriptionList",
            Subrole::CollectionList => "AXCollectionList",
            Subrole::SectionList => "AXSectionList",
            Subrole::OutlineRow => "AXOutlineRow",
            Subrole::TableRow => "AXTableRow",
            Subrole::TabButton => "AXTabButton",
            Subrole::Switch => "AXSwitch",
            Subrole::Toggle => "AXToggle",
            Subrole::Segment => "AXSegment",
            Subrole::LandmarkMain => "AXLandmarkMain",
            Subrole::LandmarkNavigation => "AXLandmarkNavigation",
            Subrole::EmptyGroup => "AXEmptyGroup",
            Subrole::Unknown => "AXUnknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_identifier_known() {
        assert_eq!(Role::from_identifier("AXButton"), Some(Role::Button));
        assert_eq!(Role::from_identifier("AXWindow"), Some(Role::Window));
        assert_eq!(Role::from_identifier("AXTextArea"), Some(Role::TextArea));
    }

    #[test]
    fn test_role_from_identifier_unknown() {
        assert_eq!(Role::from_identifier("AXFooBar"), None);
        assert_eq!(Role::from_identifier(""), None);
    }

    #[test]
    fn test_role_identifier_roundtrip() {
        for role in [
            Role::Application,
            Role::Button,
            Role::MenuItem,
            Role::ScrollArea,
            Role::Unknown,
        ] {
            assert_eq!(Role::from_identifier(role.identifier()), Some(role));
        }
    }

    #[test]
    fn test_subrole_roundtrip() {
        for subrole in [
            Subrole::CloseButton,
            Subrole::SearchField,
            Subrole::StandardWindow,
            Subrole::Unknown,
        ] {
            assert_eq!(
                Subrole::from_identifier(subrole.identifier()),
                Some(subrole)
            );
        }
        assert_eq!(Subrole::from_identifier("AXMystery"), None);
    }
}
