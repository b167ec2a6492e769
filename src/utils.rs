use bitflags::bitflags;

bitflags! {
    /// Reporting options for the batch driver.
    pub struct ReportFlags: u32 {
        const NO_FLAG = 0;
        const TRACE = 1 << 1;
        const EXPORT = 1 << 2;
        const RENDER = 1 << 3;
    }
}

impl Default for ReportFlags {
    fn default() -> Self {
        ReportFlags::TRACE | ReportFlags::EXPORT | ReportFlags::RENDER
    }
}
